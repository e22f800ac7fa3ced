//! Tests de repositorios contra PostgreSQL
//!
//! Cada test recibe una base limpia con las migraciones aplicadas.

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use itasha_wraps::dto::project_dto::CreateProjectRequest;
use itasha_wraps::dto::revision_dto::CreateRevisionRequest;
use itasha_wraps::models::{ChangeSource, NewOrder, NewVehicle, PaymentConfirmation, TransitionKind};
use itasha_wraps::repositories::order_repository::{ConfirmationOutcome, OrderRepository, CONFIRMED, DEPOSIT_PAID};
use itasha_wraps::repositories::project_repository::ProjectRepository;
use itasha_wraps::repositories::revision_repository::RevisionRepository;
use itasha_wraps::repositories::status_audit_repository::{StatusAuditRepository, PROJECT_STATUS};
use itasha_wraps::repositories::vehicle_repository::VehicleRepository;
use itasha_wraps::utils::errors::AppError;

fn new_order(order_number: &str) -> NewOrder {
    NewOrder {
        order_number: order_number.to_string(),
        customer_email: "rin@example.com".to_string(),
        customer_name: "Rin".to_string(),
        vehicle_info: "2019 Chevrolet Camaro".to_string(),
        wrap_type: "Full Wrap".to_string(),
        design_tier: "fullcustom".to_string(),
        total_price: Decimal::from(4149),
        deposit_amount: Decimal::from(1037),
        payment_provider: "stripe".to_string(),
        checkout_session_id: "cs_test_1".to_string(),
    }
}

fn confirmation(event_id: &str, order_number: &str) -> PaymentConfirmation {
    PaymentConfirmation {
        provider: "stripe",
        event_id: event_id.to_string(),
        event_type: "checkout.session.completed".to_string(),
        order_number: order_number.to_string(),
        amount_paid: Decimal::from(1037),
        payment_reference: "pi_test_1".to_string(),
        customer_email: Some("rin@example.com".to_string()),
        customer_name: Some("Rin".to_string()),
    }
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await.expect("count query");
    n
}

fn vehicle(make: &str, model: &str, total_sqft: i64) -> NewVehicle {
    NewVehicle {
        make: make.to_string(),
        model: model.to_string(),
        year: 2022,
        trim: None,
        sqft_25: None,
        sqft_50: None,
        sqft_75: None,
        total_sqft: Decimal::from(total_sqft),
    }
}

async fn create_project(pool: &PgPool) -> Uuid {
    let request: CreateProjectRequest =
        serde_json::from_value(json!({ "title": "Miku Camaro", "customer_email": "rin@example.com" }))
            .expect("project request");
    ProjectRepository::new(pool.clone())
        .create(&request)
        .await
        .expect("project created")
        .id
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_replayed_payment_event_has_no_effect(pool: PgPool) {
    let orders = OrderRepository::new(pool.clone());
    let order = orders.create(&new_order("XS-REPLAY")).await.expect("order created");

    let first = orders
        .apply_confirmation(&confirmation("evt_1", "XS-REPLAY"))
        .await
        .expect("first delivery");
    let second = orders
        .apply_confirmation(&confirmation("evt_1", "XS-REPLAY"))
        .await
        .expect("second delivery");

    assert_eq!(first, ConfirmationOutcome::Applied);
    assert_eq!(second, ConfirmationOutcome::Duplicate);

    let stored = orders.find_by_id(order.id).await.expect("query").expect("order exists");
    assert_eq!(stored.payment_status, DEPOSIT_PAID);
    assert_eq!(stored.status, CONFIRMED);
    assert_eq!(stored.amount_paid, Decimal::from(1037));
    assert_eq!(stored.payment_reference, "pi_test_1");

    // Una fila por evento y una auditoría por campo, no por entrega
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM webhook_events").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM status_changes WHERE source = 'webhook'").await, 2);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM customers WHERE email = 'rin@example.com'").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_event_for_unknown_order_is_recorded(pool: PgPool) {
    let orders = OrderRepository::new(pool.clone());

    let outcome = orders
        .apply_confirmation(&confirmation("evt_ghost", "XS-NOPE"))
        .await
        .expect("delivery");
    assert_eq!(outcome, ConfirmationOutcome::UnknownOrder);

    let (order_number,): (Option<String>,) =
        sqlx::query_as("SELECT order_number FROM webhook_events WHERE event_id = 'evt_ghost'")
            .fetch_one(&pool)
            .await
            .expect("event recorded");
    assert_eq!(order_number.as_deref(), Some("XS-NOPE"));
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM status_changes").await, 0);

    let retry = orders
        .apply_confirmation(&confirmation("evt_ghost", "XS-NOPE"))
        .await
        .expect("retry");
    assert_eq!(retry, ConfirmationOutcome::Duplicate);
}

// ---------------------------------------------------------------------------
// Auditoría de estados
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_status_writes_are_audited_and_classified(pool: PgPool) {
    let project_id = create_project(&pool).await;
    let audit = StatusAuditRepository::new(pool.clone());

    let forward = audit
        .write_status(PROJECT_STATUS, project_id, "printing", ChangeSource::Admin, Some("owner@itasha.test"))
        .await
        .expect("forward write");
    assert_eq!(forward.previous, "design");
    assert_eq!(forward.transition, TransitionKind::Forward);

    // Retroceso: aceptado y registrado
    let backward = audit
        .write_status(PROJECT_STATUS, project_id, " design ", ChangeSource::Admin, Some("owner@itasha.test"))
        .await
        .expect("backward write");
    assert_eq!(backward.current, "design");
    assert_eq!(backward.transition, TransitionKind::Backward);

    let off_flow = audit
        .write_status(PROJECT_STATUS, project_id, "on_hold", ChangeSource::Admin, None)
        .await
        .expect("free-form write");
    assert_eq!(off_flow.transition, TransitionKind::OffFlow);

    let (status,): (String,) = sqlx::query_as("SELECT status FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_one(&pool)
        .await
        .expect("project row");
    assert_eq!(status, "on_hold");

    let history = audit.history("projects", project_id).await.expect("history");
    let transitions: Vec<&str> = history.iter().map(|c| c.transition.as_str()).collect();
    assert_eq!(transitions, vec!["forward", "backward", "off_flow"]);
    assert_eq!(history[0].from_status.as_deref(), Some("design"));
    assert_eq!(history[0].to_status, "printing");
    assert_eq!(history[0].source, "admin");
    assert_eq!(history[0].actor.as_deref(), Some("owner@itasha.test"));
    assert!(history[2].actor.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejected_status_writes_leave_no_trace(pool: PgPool) {
    let project_id = create_project(&pool).await;
    let audit = StatusAuditRepository::new(pool.clone());

    let blank = audit
        .write_status(PROJECT_STATUS, project_id, "   ", ChangeSource::Admin, None)
        .await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let missing = audit
        .write_status(PROJECT_STATUS, Uuid::new_v4(), "printing", ChangeSource::Admin, None)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    assert_eq!(count(&pool, "SELECT COUNT(*) FROM status_changes").await, 0);
}

// ---------------------------------------------------------------------------
// Vehículos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_all_swaps_the_whole_table(pool: PgPool) {
    let vehicles = VehicleRepository::new(pool.clone());

    vehicles
        .replace_all(&[vehicle("Toyota", "GR86", 240), vehicle("Subaru", "BRZ", 240)])
        .await
        .expect("first import");

    let inserted = vehicles
        .replace_all(&[
            vehicle("Honda", "Civic", 250),
            vehicle("Mazda", "MX-5", 180),
            vehicle("Nissan", "Z", 260),
        ])
        .await
        .expect("second import");
    assert_eq!(inserted, 3);

    let makes: Vec<String> = vehicles.list(None).await.expect("list").into_iter().map(|v| v.make).collect();
    assert_eq!(makes, vec!["Honda", "Mazda", "Nissan"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_replace_keeps_previous_table(pool: PgPool) {
    let vehicles = VehicleRepository::new(pool.clone());
    vehicles
        .replace_all(&[vehicle("Toyota", "GR86", 240), vehicle("Subaru", "BRZ", 240)])
        .await
        .expect("first import");

    // total_sqft = 0 viola el CHECK de la tabla
    let result = vehicles
        .replace_all(&[vehicle("Honda", "Civic", 250), vehicle("Broken", "Row", 0)])
        .await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let stats = vehicles.stats().await.expect("stats");
    assert_eq!(stats.total_vehicles, 2);
    assert_eq!(stats.total_makes, 2);
}

// ---------------------------------------------------------------------------
// Revisiones
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_revision_numbers_count_per_customer_email(pool: PgPool) {
    let revisions = RevisionRepository::new(pool.clone());
    let request = |description: &str| CreateRevisionRequest {
        project_id: None,
        order_id: None,
        description: description.to_string(),
        reference_images: Vec::new(),
    };

    let first = revisions.create("rin@example.com", &request("Bigger logo")).await.expect("first");
    let other = revisions.create("len@example.com", &request("Swap colours")).await.expect("other");
    let second = revisions
        .create(" Rin@Example.com ", &request("Darker outline"))
        .await
        .expect("second");

    assert_eq!(first.revision_number, 1);
    assert_eq!(other.revision_number, 1);
    assert_eq!(second.revision_number, 2);
    assert_eq!(second.customer_email, "rin@example.com");
    assert_eq!(second.status, "pending");

    let listed: Vec<i32> = revisions
        .find_by_email("rin@example.com")
        .await
        .expect("list")
        .into_iter()
        .map(|r| r.revision_number)
        .collect();
    assert_eq!(listed, vec![2, 1]);
}
