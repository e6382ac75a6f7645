//! Field validator properties: pure, fail-fast, closed enum sets.

use bujo_core::{
    ExpenseInput, ExpenseResource, HabitInput, HabitResource, ProjectInput, ProjectResource,
    ResourceSchema, TaskInput, TaskResource, ValidationError,
};

fn valid_task() -> TaskInput {
    TaskInput {
        symbol: Some("•".to_string()),
        name: Some("Reunión equipo".to_string()),
        date: Some("2025-02-28".to_string()),
        priority: Some("Alta".to_string()),
        notes: Some("Preparar PPT".to_string()),
    }
}

fn valid_project() -> ProjectInput {
    ProjectInput {
        symbol: Some("◇".to_string()),
        name: Some("Mudanza".to_string()),
        start_date: Some("2025-01-10".to_string()),
        end_date: Some("2025-02-10".to_string()),
        status: Some("Pendiente".to_string()),
        associated_tasks: None,
    }
}

fn valid_habit() -> HabitInput {
    HabitInput {
        name: Some("Meditar".to_string()),
        frequency: Some("Diario".to_string()),
        status: Some("Pendiente".to_string()),
        notes: None,
        associated_project: None,
    }
}

fn valid_expense() -> ExpenseInput {
    ExpenseInput {
        category: Some("Transporte".to_string()),
        amount: Some(50.0),
        date: Some("2025-01-10".to_string()),
        description: None,
        associated_project: None,
    }
}

#[test]
fn missing_required_field_fails_with_the_field_name() {
    let empty = TaskInput::default();
    assert_eq!(
        TaskResource::validate(&empty).unwrap_err(),
        ValidationError::MissingField("symbol")
    );

    let mut input = valid_task();
    input.name = Some(String::new());
    assert_eq!(
        TaskResource::validate(&input).unwrap_err(),
        ValidationError::MissingField("task")
    );
}

#[test]
fn presence_rules_run_before_enum_rules() {
    // Both the name and the priority are wrong; the missing field wins.
    let mut input = valid_task();
    input.name = None;
    input.priority = Some("Urgente".to_string());
    assert_eq!(
        TaskResource::validate(&input).unwrap_err(),
        ValidationError::MissingField("task")
    );
}

#[test]
fn every_enumerated_task_value_is_accepted() {
    for symbol in ["•", "x", ">", "<"] {
        for priority in ["Alta", "Media", "Baja"] {
            let mut input = valid_task();
            input.symbol = Some(symbol.to_string());
            input.priority = Some(priority.to_string());
            assert!(
                TaskResource::validate(&input).is_ok(),
                "rejected symbol={symbol} priority={priority}"
            );
        }
    }
}

#[test]
fn out_of_set_enum_values_are_rejected() {
    let mut task = valid_task();
    task.symbol = Some("-".to_string());
    assert!(matches!(
        TaskResource::validate(&task).unwrap_err(),
        ValidationError::UnknownEnumValue { field: "symbol", .. }
    ));

    let mut project = valid_project();
    project.status = Some("Terminado".to_string());
    assert!(matches!(
        ProjectResource::validate(&project).unwrap_err(),
        ValidationError::UnknownEnumValue { field: "status", .. }
    ));

    let mut habit = valid_habit();
    habit.frequency = Some("Cada tanto".to_string());
    assert!(matches!(
        HabitResource::validate(&habit).unwrap_err(),
        ValidationError::UnknownEnumValue { field: "frequency", .. }
    ));

    let mut expense = valid_expense();
    expense.category = Some("Viajes".to_string());
    assert!(matches!(
        ExpenseResource::validate(&expense).unwrap_err(),
        ValidationError::UnknownEnumValue { field: "category", .. }
    ));
}

#[test]
fn every_enumerated_habit_value_is_accepted() {
    let frequencies = [
        "Diario",
        "Semanal",
        "Mensual",
        "Ocasional",
        "2 veces/semana",
        "3 veces/semana",
        "Quincenal",
        "Bimestral",
        "Anual",
        "Personalizado",
    ];
    let statuses = [
        "Completado",
        "Pendiente",
        "En progreso",
        "Cancelado",
        "Reprogramado",
        "Inspirado",
    ];

    for frequency in frequencies {
        for status in statuses {
            let mut input = valid_habit();
            input.frequency = Some(frequency.to_string());
            input.status = Some(status.to_string());
            assert!(
                HabitResource::validate(&input).is_ok(),
                "rejected frequency={frequency} status={status}"
            );
        }
    }
}

#[test]
fn every_enumerated_expense_category_is_accepted() {
    for category in [
        "Transporte",
        "Alimentación",
        "Educación",
        "Salud",
        "Servicios",
        "Otros",
    ] {
        let mut input = valid_expense();
        input.category = Some(category.to_string());
        assert!(
            ExpenseResource::validate(&input).is_ok(),
            "rejected category={category}"
        );
    }
}

#[test]
fn unparseable_dates_are_rejected() {
    let mut task = valid_task();
    task.date = Some("mañana".to_string());
    assert!(matches!(
        TaskResource::validate(&task).unwrap_err(),
        ValidationError::UnparseableDate { field: "date", .. }
    ));

    let mut task = valid_task();
    task.date = Some("2025-13-40".to_string());
    assert!(matches!(
        TaskResource::validate(&task).unwrap_err(),
        ValidationError::UnparseableDate { .. }
    ));
}

#[test]
fn rfc3339_timestamps_parse_to_their_calendar_date() {
    let mut task = valid_task();
    task.date = Some("2025-02-28T10:30:00Z".to_string());
    let fields = TaskResource::validate(&task).unwrap();
    assert_eq!(fields.date.to_string(), "2025-02-28");
}

#[test]
fn project_date_range_must_not_invert() {
    let mut inverted = valid_project();
    inverted.start_date = Some("2025-02-11".to_string());
    inverted.end_date = Some("2025-02-10".to_string());
    assert!(matches!(
        ProjectResource::validate(&inverted).unwrap_err(),
        ValidationError::InvertedDateRange { .. }
    ));

    let mut same_day = valid_project();
    same_day.start_date = Some("2025-02-10".to_string());
    same_day.end_date = Some("2025-02-10".to_string());
    assert!(ProjectResource::validate(&same_day).is_ok());
}

#[test]
fn expense_amount_rules() {
    let mut missing = valid_expense();
    missing.amount = None;
    assert_eq!(
        ExpenseResource::validate(&missing).unwrap_err(),
        ValidationError::MissingField("amount")
    );

    let mut negative = valid_expense();
    negative.amount = Some(-0.01);
    assert!(matches!(
        ExpenseResource::validate(&negative).unwrap_err(),
        ValidationError::NegativeAmount { .. }
    ));

    let mut zero = valid_expense();
    zero.amount = Some(0.0);
    assert!(ExpenseResource::validate(&zero).is_ok());
}
