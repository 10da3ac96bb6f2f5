use mailtrack_core::db::open_db_in_memory;
use mailtrack_core::{
    CreateOfficeRequest, ErrorKind, ErrorResponse, ItemService, ItemType, OfficeService,
    RegisterItemRequest, ServiceError, SqliteItemRepository, SqliteOfficeRepository,
    TransitionRequest, UpdateOfficeRequest,
};
use rusqlite::Connection;

#[test]
fn create_and_view_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let created = service
        .create(Some(&CreateOfficeRequest {
            index: "1232322".to_string(),
            name: "central office".to_string(),
            address: "main street 1, springfield".to_string(),
        }))
        .unwrap();

    let viewed = service.view(Some(created.id)).unwrap();
    assert_eq!(viewed, created);
    assert_eq!(viewed.name, "central office");
}

#[test]
fn create_rejects_missing_payload() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let err = service.create(None).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument { .. }));
}

#[test]
fn create_rejects_out_of_bounds_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let err = service
        .create(Some(&CreateOfficeRequest {
            index: "1232322".to_string(),
            name: "po".to_string(),
            address: "short".to_string(),
        }))
        .unwrap_err();

    match &err {
        ServiceError::InvalidArgument { field_errors, .. } => {
            assert_eq!(field_errors.len(), 2);
            assert_eq!(field_errors[0].field, "name");
            assert_eq!(field_errors[1].field, "address");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_replaces_all_fields_and_preserves_id() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let created = service.create(Some(&sample_office())).unwrap();

    let updated = service
        .update(Some(&UpdateOfficeRequest {
            id: Some(created.id),
            index: "9998887".to_string(),
            name: "relocated office".to_string(),
            address: "new street 42, shelbyville".to_string(),
        }))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.index, "9998887");
    assert_eq!(updated.name, "relocated office");

    let viewed = service.view(Some(created.id)).unwrap();
    assert_eq!(viewed, updated);
}

#[test]
fn update_rejects_missing_payload_or_id() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    assert!(matches!(
        service.update(None),
        Err(ServiceError::InvalidArgument { .. })
    ));

    let mut request = UpdateOfficeRequest {
        id: None,
        index: "1232322".to_string(),
        name: "central office".to_string(),
        address: "main street 1, springfield".to_string(),
    };
    assert!(matches!(
        service.update(Some(&request)),
        Err(ServiceError::InvalidArgument { .. })
    ));

    request.id = Some(999);
    assert!(matches!(
        service.update(Some(&request)),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn delete_removes_office() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let created = service.create(Some(&sample_office())).unwrap();
    service.delete(Some(created.id)).unwrap();

    assert!(matches!(
        service.view(Some(created.id)),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(Some(created.id)),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn delete_rejects_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    assert!(matches!(
        service.delete(None),
        Err(ServiceError::InvalidArgument { .. })
    ));
}

#[test]
fn view_guards_missing_and_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let invalid = service.view(None).unwrap_err();
    assert_eq!(invalid.message(), "post office id is not valid");

    let not_found = service.view(Some(999)).unwrap_err();
    assert!(matches!(not_found, ServiceError::NotFound(_)));
    assert!(not_found.message().contains("999"));
}

#[test]
fn delete_cascades_to_items_and_their_history() {
    let conn = open_db_in_memory().unwrap();
    let offices = office_service(&conn);
    let items = item_service(&conn);

    let office = offices.create(Some(&sample_office())).unwrap();
    let item = items.register(Some(&sample_item())).unwrap();
    items
        .arrive(&TransitionRequest {
            item_id: Some(item.id),
            office_id: Some(office.id),
        })
        .unwrap();

    offices.delete(Some(office.id)).unwrap();

    assert!(matches!(
        items.view(Some(item.id)),
        Err(ServiceError::NotFound(_))
    ));
    assert_eq!(history_row_count(&conn, item.id), 0);
}

#[test]
fn error_kind_maps_to_boundary_status() {
    assert_eq!(ErrorKind::InvalidArgument.http_status(), 400);
    assert_eq!(ErrorKind::NotFound.http_status(), 404);
    assert_eq!(ErrorKind::Internal.http_status(), 500);
}

#[test]
fn error_response_carries_kind_message_and_field_errors() {
    let conn = open_db_in_memory().unwrap();
    let service = office_service(&conn);

    let err = service
        .create(Some(&CreateOfficeRequest {
            index: "1232322".to_string(),
            name: "po".to_string(),
            address: "main street 1, springfield".to_string(),
        }))
        .unwrap_err();

    let response = ErrorResponse::new(&err, Some("POST /post-office/create".to_string()));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error_kind"], "invalid_argument");
    assert_eq!(json["message"], "post office fields are not valid");
    assert_eq!(json["context"], "POST /post-office/create");
    assert_eq!(json["validation_errors"][0]["field"], "name");
}

fn office_service(conn: &Connection) -> OfficeService<SqliteOfficeRepository<'_>> {
    OfficeService::new(SqliteOfficeRepository::try_new(conn).unwrap())
}

fn item_service(
    conn: &Connection,
) -> ItemService<SqliteItemRepository<'_>, SqliteOfficeRepository<'_>> {
    ItemService::new(
        SqliteItemRepository::try_new(conn).unwrap(),
        SqliteOfficeRepository::try_new(conn).unwrap(),
    )
}

fn sample_office() -> CreateOfficeRequest {
    CreateOfficeRequest {
        index: "1232322".to_string(),
        name: "central office".to_string(),
        address: "main street 1, springfield".to_string(),
    }
}

fn sample_item() -> RegisterItemRequest {
    RegisterItemRequest {
        kind: ItemType::Letter,
        recipient_index: "1235654".to_string(),
        recipient_address: "recipient address".to_string(),
        recipient_name: "recipient name".to_string(),
    }
}

fn history_row_count(conn: &Connection, item_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM history_item WHERE item_id = ?1;",
        [item_id],
        |row| row.get(0),
    )
    .unwrap()
}
