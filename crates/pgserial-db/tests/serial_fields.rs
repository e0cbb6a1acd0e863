//! Integration tests for serial fields through the public API.
//!
//! These tests exercise the path a model declaration takes through the ORM:
//! - Declaring the fields and running the check pass
//! - Preparing values and compiling the INSERT
//! - Deconstructing and rebuilding the declaration
//! - Resolving the connection from settings

use pgserial_core::{settings_loader, CheckLevel};
use pgserial_db::connection::Connection;
use pgserial_db::fields::{
    check_fields, reconstruct, BigSerialField, FieldOptions, IntegerField, NumericField,
    SerialField, SmallSerialField, SERIAL_DB_COMMENT,
};
use pgserial_db::query::{prepare_insert, returning_columns, SqlCompiler};
use pgserial_db::value::{PrepValue, Value};

fn order_fields() -> (BigSerialField, SerialField, IntegerField) {
    (
        BigSerialField::new(FieldOptions::new("id").model("shop.Order").primary_key()),
        SerialField::new(FieldOptions::new("number").model("shop.Order").unique()),
        IntegerField::new(FieldOptions::new("quantity").model("shop.Order")),
    )
}

// ── 1. Declaration and checks ───────────────────────────────────────────

#[test]
fn test_well_declared_model_has_no_check_messages() {
    let (id, number, quantity) = order_fields();
    assert!(check_fields("shop.Order", &[&id, &number, &quantity]).is_empty());
}

#[test]
fn test_misdeclared_serial_fields_are_reported() {
    let nullable = SerialField::new(FieldOptions::new("number").model("shop.Order").nullable());
    let defaulted = SmallSerialField::new(FieldOptions::new("seq").model("shop.Order").default(0));
    let messages = check_fields("shop.Order", &[&nullable, &defaulted]);

    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.level == CheckLevel::Error));
    assert!(messages[0].has_id("fields.E013"));
    assert_eq!(messages[0].obj.as_deref(), Some("shop.Order.number"));
    assert!(messages[1].has_id("fields.E014"));
    assert_eq!(
        messages[1].to_string(),
        "(fields.E014) ERROR: SerialFields do not accept default values."
    );
}

// ── 2. Saving a new instance ────────────────────────────────────────────

#[test]
fn test_unsaved_instance_inserts_with_database_defaults() {
    let (id, number, quantity) = order_fields();

    for field in [&id as &dyn NumericField, &number as &dyn NumericField] {
        assert_eq!(field.clean(Value::Null).unwrap(), Value::Null);
    }

    let prepared = prepare_insert(&[
        (&id as &dyn NumericField, Value::Null),
        (&number as &dyn NumericField, Value::Null),
        (&quantity as &dyn NumericField, Value::Int(3)),
    ])
    .unwrap();
    assert!(prepared[0].1.is_database_default());
    assert!(prepared[1].1.is_database_default());

    let returning = returning_columns(&[
        &id as &dyn NumericField,
        &number as &dyn NumericField,
        &quantity as &dyn NumericField,
    ]);
    let conn = Connection::postgres();
    let (sql, params) =
        SqlCompiler::new(conn.backend).compile_insert("shop_order", &prepared, &returning);
    assert_eq!(
        sql,
        "INSERT INTO \"shop_order\" (\"quantity\") VALUES ($1) RETURNING \"id\", \"number\""
    );
    assert_eq!(params, vec![Value::Int(3)]);
}

#[test]
fn test_explicit_serial_value_is_sent() {
    let (id, _, _) = order_fields();
    assert_eq!(
        id.get_prep_value(Value::Int(42)).unwrap(),
        PrepValue::Value(Value::Int(42))
    );
}

#[test]
fn test_bulk_insert_mixes_defaults_and_values() {
    let (id, _, quantity) = order_fields();
    let rows: Vec<Vec<PrepValue>> = [(Value::Null, 1), (Value::Int(10), 2)]
        .into_iter()
        .map(|(pk, qty)| {
            vec![
                id.get_prep_value(pk).unwrap(),
                quantity.get_prep_value(Value::Int(qty)).unwrap(),
            ]
        })
        .collect();
    let (sql, params) = SqlCompiler::new(Connection::postgres().backend)
        .compile_bulk_insert(
            "shop_order",
            &[id.column(), quantity.column()],
            &rows,
            &returning_columns(&[&id as &dyn NumericField, &quantity as &dyn NumericField]),
        )
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"shop_order\" (\"id\", \"quantity\") VALUES (DEFAULT, $1), ($2, $3) \
         RETURNING \"id\""
    );
    assert_eq!(params.len(), 3);
}

// ── 3. Migrations round trip ────────────────────────────────────────────

#[test]
fn test_deconstruct_reconstruct_every_serial_width() {
    let fields: Vec<Box<dyn NumericField>> = vec![
        Box::new(SmallSerialField::new(FieldOptions::new("a"))),
        Box::new(SerialField::new(FieldOptions::new("b").db_index())),
        Box::new(BigSerialField::new(FieldOptions::new("c").primary_key())),
    ];
    for field in &fields {
        let record = field.deconstruct();
        assert!(!record.kwargs.contains_key("blank"));
        assert_eq!(
            record.kwargs.get("db_comment").and_then(|v| v.as_str()),
            Some(SERIAL_DB_COMMENT)
        );

        let rebuilt = reconstruct(&record).unwrap();
        assert_eq!(rebuilt.internal_type(), field.internal_type());
        assert!(rebuilt.options().blank);
        assert_eq!(rebuilt.options(), field.options());
    }
}

#[test]
fn test_deconstructed_record_survives_json() {
    let field = SerialField::new(FieldOptions::new("number").column("order_no"));
    let json = serde_json::to_string(&field.deconstruct()).unwrap();
    let record = serde_json::from_str(&json).unwrap();
    assert_eq!(SerialField::from_deconstructed(&record).unwrap(), field);
}

// ── 4. Connection from settings ─────────────────────────────────────────

#[test]
fn test_db_type_for_configured_backend() {
    let settings = settings_loader::from_toml_str(
        r#"
        [databases.default]
        engine = "pgserial.db.backends.postgresql"
        name = "shop"

        [databases.legacy]
        engine = "pgserial.db.backends.sqlite3"
        name = "legacy.db"
        "#,
    )
    .unwrap();

    let field = BigSerialField::default();
    let pg = Connection::from_settings(&settings, "default").unwrap();
    assert_eq!(field.db_type(&pg), "bigserial");

    let sqlite = Connection::from_settings(&settings, "legacy").unwrap();
    assert!(!sqlite.is_postgres());
    assert_eq!(field.db_type(&sqlite), "bigserial");
}
