use chrono::{Duration, TimeZone, Utc};
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Category, DueStatus, FixedClock, Priority, RepoError, Selection, SortMode,
    SqliteTaskRepository, Task, TaskDraft, TaskFilter, TaskPatch, TaskRepository, TaskService,
    TaskServiceError, TaskValidationError,
};
use uuid::Uuid;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 5, 22, 10, 0, 0).unwrap())
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::create(TaskDraft::new("Design landing page"), clock().0).unwrap();
    task.category = Category::Work;
    task.priority = Priority::High;
    task.due_date = Some(Utc.with_ymd_and_hms(2025, 5, 25, 0, 0, 0).unwrap());
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let titles = ["zeta", "alpha", "mid"];
    for title in titles {
        repo.create_task(&Task::create(TaskDraft::new(title), clock().0).unwrap())
            .unwrap();
    }

    let listed: Vec<String> = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(listed, titles);
}

#[test]
fn update_and_delete_missing_task_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let task = Task::create(TaskDraft::new("ghost"), clock().0).unwrap();

    let err = repo.update_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));

    let err = repo.delete_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
}

#[test]
fn repository_rejects_blank_title_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let mut task = Task::create(TaskDraft::new("valid"), clock().0).unwrap();
    task.title = "   ".to_string();

    let err = repo.create_task(&task).unwrap_err();
    assert!(matches!(
        err,
        RepoError::TaskValidation(TaskValidationError::EmptyTitle)
    ));
}

#[test]
fn corrupted_enum_value_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let task = Task::create(TaskDraft::new("tamper"), clock().0).unwrap();
    repo.create_task(&task).unwrap();

    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "UPDATE tasks SET priority = 'urgent' WHERE id = ?1;",
        [task.id.to_string()],
    )
    .unwrap();

    let err = repo.get_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("urgent")));
}

#[test]
fn service_create_stamps_clock_and_defaults() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());

    let task = service
        .create_task(TaskDraft::new("  Buy milk "))
        .unwrap();

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.created_at, clock().0);
    assert!(!task.completed);
    assert_eq!(service.list_tasks().unwrap(), vec![task]);
}

#[test]
fn service_create_rejects_blank_title_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());

    let err = service.create_task(TaskDraft::new("")).unwrap_err();
    assert!(matches!(
        err,
        TaskServiceError::Validation(TaskValidationError::EmptyTitle)
    ));
    assert!(service.list_tasks().unwrap().is_empty());
}

#[test]
fn service_partial_update_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());
    let created = service.create_task(TaskDraft::new("Draft report")).unwrap();

    let later = TaskService::new(
        SqliteTaskRepository::new(&conn),
        FixedClock(clock().0 + Duration::days(3)),
    );
    let updated = later
        .update_task(
            created.id,
            TaskPatch {
                title: Some("Final report".to_string()),
                priority: Some(Priority::High),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "Final report");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.category, created.category);
}

#[test]
fn service_toggle_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());
    let task = service.create_task(TaskDraft::new("Stretch")).unwrap();

    assert!(service.toggle_completed(task.id).unwrap().completed);
    assert!(service.get_task(task.id).unwrap().unwrap().completed);
    assert!(!service.toggle_completed(task.id).unwrap().completed);

    service.delete_task(task.id).unwrap();
    assert!(service.get_task(task.id).unwrap().is_none());

    let err = service.toggle_completed(task.id).unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(id) if id == task.id));
}

#[test]
fn service_update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());
    let missing = Uuid::new_v4();

    let err = service
        .update_task(
            missing,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(id) if id == missing));
}

#[test]
fn service_view_reflects_mutations_and_filters() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());

    let milk = service
        .create_task(TaskDraft {
            title: "Buy milk".to_string(),
            category: Category::Shopping,
            due_date: Some(clock().0 + Duration::hours(10)),
            ..TaskDraft::default()
        })
        .unwrap();
    let gym = service
        .create_task(TaskDraft {
            title: "Gym".to_string(),
            category: Category::Health,
            priority: Priority::Low,
            due_date: Some(clock().0 - Duration::days(1)),
            ..TaskDraft::default()
        })
        .unwrap();
    service.toggle_completed(gym.id).unwrap();

    let shopping = TaskFilter::all().with_category(Selection::Only(Category::Shopping));
    let view = service.task_view(&shopping, SortMode::DueDate).unwrap();
    assert_eq!(view.pending.len(), 1);
    assert_eq!(view.pending[0].id, milk.id);
    assert!(view.completed.is_empty());
    assert_eq!(view.stats.total, 2);
    assert_eq!(view.stats.completed, 1);
    assert_eq!(view.stats.pending, 1);

    assert_eq!(service.due_status(&view.pending[0]), DueStatus::DueSoon);
}

#[test]
fn service_calendar_uses_clock_month() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn), clock());
    service
        .create_task(TaskDraft {
            title: "Dentist".to_string(),
            due_date: Some(Utc.with_ymd_and_hms(2025, 5, 22, 15, 0, 0).unwrap()),
            ..TaskDraft::default()
        })
        .unwrap();

    let month = service.current_month();
    assert_eq!((month.year(), month.month()), (2025, 5));

    let grid = service.calendar_month(month).unwrap();
    assert_eq!(grid[21].tasks.len(), 1);

    let today = service.tasks_due_on(clock().0.date_naive()).unwrap();
    assert_eq!(today.len(), 1);
}
