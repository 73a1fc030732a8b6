// ==========================================
// 物业报表 (Rent Roll) 集成测试
// ==========================================
// 测试目标: 表头定位、物业分组、小计行剔除、金额与租期转换
// ==========================================


use rental_report_ingest::importer::{parse_property_report, ImportError};
use test_helpers::{SheetBuilder, XCell};

fn header_at(builder: SheetBuilder, row: u32) -> SheetBuilder {
    builder.row(
        row,
        vec![
            XCell::Text("Unit"),
            XCell::Text("BD/BA"),
            XCell::Text("Status"),
            XCell::Text("Sqft"),
            XCell::Text("Total"),
        ],
    )
}

fn unit(builder: SheetBuilder, row: u32, unit: &'static str, total: f64) -> SheetBuilder {
    builder.row(
        row,
        vec![
            XCell::Text(unit),
            XCell::Text("2/1"),
            XCell::Text("Current"),
            XCell::Number(850.0),
            XCell::Number(total),
        ],
    )
}

#[test]
fn test_units_grouped_by_property() {
    let mut sheet = SheetBuilder::new().cell(0, 0, XCell::Text("Rent Roll Itemized"));
    sheet = header_at(sheet, 4);
    sheet = sheet.cell(5, 0, XCell::Text("Maple Court"));
    sheet = unit(sheet, 6, "101", 1200.0);
    sheet = unit(sheet, 7, "102", 1250.0);
    sheet = sheet.cell(9, 0, XCell::Text("Cedar Point"));
    sheet = unit(sheet, 10, "A-1", 990.0);

    let units = parse_property_report(&sheet.build()).unwrap();

    let keys: Vec<_> = units
        .iter()
        .map(|u| (u.property.as_str(), u.unit.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![("Maple Court", "101"), ("Maple Court", "102"), ("Cedar Point", "A-1")]
    );
    assert_eq!(units[0].bd_ba.as_deref(), Some("2/1"));
    assert_eq!(units[0].status.as_deref(), Some("Current"));
    assert_eq!(units[0].sqft, Some(850));
    assert_eq!(units[1].total, Some(1250.0));
}

#[test]
fn test_subtotal_row_excluded() {
    let mut sheet = header_at(SheetBuilder::new(), 0);
    sheet = sheet.cell(1, 0, XCell::Text("Maple Court"));
    sheet = unit(sheet, 2, "101", 1200.0);
    sheet = sheet
        .cell(3, 0, XCell::Text("2 Units"))
        .cell(3, 4, XCell::Number(2450.0));
    sheet = unit(sheet, 4, "102", 1250.0);

    let units = parse_property_report(&sheet.build()).unwrap();

    let ids: Vec<_> = units.iter().map(|u| u.unit.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);
}

#[test]
fn test_charges_and_lease_dates() {
    let mut sheet = header_at(SheetBuilder::new(), 0);
    sheet = sheet.cell(1, 0, XCell::Text("Maple Court"));
    sheet = unit(sheet, 2, "101", 1200.0)
        .cell(2, 5, XCell::Number(35.25))
        .cell(2, 8, XCell::Text("1100.00"))
        .cell(2, 14, XCell::Number(25.0))
        .cell(2, 18, XCell::DateTime(2025, 6, 1, 0, 0))
        .cell(2, 19, XCell::Text("05/31/2026"));

    let units = parse_property_report(&sheet.build()).unwrap();
    let record = &units[0];

    assert_eq!(record.past_due, Some(35.25));
    assert_eq!(record.other_charges, None);
    assert_eq!(record.tenant_rental_income, Some(1100.0));
    assert_eq!(record.pet_rent, Some(25.0));
    assert_eq!(record.insurance_services, None);
    assert_eq!(record.lease_from.as_deref(), Some("2025-06-01"));
    // 文本日期不转换
    assert_eq!(record.lease_to, None);
}

#[test]
fn test_text_sqft_is_not_converted() {
    let sheet = header_at(SheetBuilder::new(), 0)
        .cell(1, 0, XCell::Text("Maple Court"))
        .row(
            2,
            vec![
                XCell::Text("101"),
                XCell::Text("1/1"),
                XCell::Text("Vacant"),
                XCell::Text("700"),
            ],
        );

    let units = parse_property_report(&sheet.build()).unwrap();

    assert_eq!(units[0].sqft, None);
    assert_eq!(units[0].total, None);
}

#[test]
fn test_non_numeric_amount_fails_file() {
    let mut sheet = header_at(SheetBuilder::new(), 0);
    sheet = sheet.cell(1, 0, XCell::Text("Maple Court"));
    sheet = unit(sheet, 2, "101", 1200.0).cell(2, 6, XCell::Text("n/a"));

    let result = parse_property_report(&sheet.build());

    match result {
        Err(ImportError::TypeConversionError { field, .. }) => assert_eq!(field, "other_charges"),
        other => panic!("expected type conversion error, got {:?}", other),
    }
}

#[test]
fn test_missing_header_fails_file() {
    let sheet = SheetBuilder::new()
        .cell(0, 0, XCell::Text("Maple Court"))
        .row(1, vec![XCell::Text("101"), XCell::Text("2/1")]);

    let result = parse_property_report(&sheet.build());
    assert!(matches!(result, Err(ImportError::HeaderNotFound(_))));
}

#[test]
fn test_serialized_record_uses_null_for_missing_amounts() {
    let mut sheet = header_at(SheetBuilder::new(), 0);
    sheet = sheet.cell(1, 0, XCell::Text("Maple Court"));
    sheet = unit(sheet, 2, "101", 1200.0);

    let units = parse_property_report(&sheet.build()).unwrap();
    let json = serde_json::to_value(&units[0]).unwrap();

    assert_eq!(json["property"], "Maple Court");
    assert_eq!(json["total"], 1200.0);
    assert!(json["parking_fee"].is_null());
    assert!(json["lease_from"].is_null());
}
