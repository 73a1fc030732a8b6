// ==========================================
// 客户咨询报表 (Excel) 集成测试
// ==========================================
// 测试目标: 真实 xlsx 字节经 calamine 读取后的分组与字段映射
// ==========================================


use rental_report_ingest::importer::{parse_leasing_excel, ImportError};
use test_helpers::{leasing_row, SheetBuilder, XCell};

/// 标题与表头写在前导区，数据区从第 12 行开始
fn report_skeleton(with_inquiry_id: bool) -> SheetBuilder {
    let mut header = vec![
        XCell::Text("Name"),
        XCell::Text("Email"),
        XCell::Text("Phone"),
        XCell::Text("Inquiry Received"),
    ];
    if with_inquiry_id {
        while header.len() < 15 {
            header.push(XCell::Text("Col"));
        }
        header.push(XCell::Text("Inquiry ID"));
    }

    SheetBuilder::new()
        .cell(0, 0, XCell::Text("Guest Card Inquiries"))
        .row(2, header)
}

#[test]
fn test_single_property_round_trip() {
    let bytes = report_skeleton(false)
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .row(13, leasing_row("Jane Doe", "jane@x.com", 15))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    assert_eq!(inquiries.len(), 1);
    let jane = &inquiries[0];
    assert_eq!(jane.property.as_deref(), Some("Sunset Apartments"));
    assert_eq!(jane.name.as_deref(), Some("Jane Doe"));
    assert_eq!(jane.email.as_deref(), Some("jane@x.com"));
    assert_eq!(jane.phone.as_deref(), Some("555-1234"));
    assert_eq!(jane.inquiry_received, "2026-01-15T10:30:00");
    assert_eq!(jane.first_contact, None);
    assert_eq!(jane.inquiry_id, None);
}

#[test]
fn test_multiple_properties_keep_latest_group() {
    let bytes = report_skeleton(false)
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .row(13, leasing_row("Jane Doe", "jane@x.com", 15))
        .row(14, leasing_row("John Roe", "john@x.com", 16))
        .cell(16, 0, XCell::Text("Oak Ridge"))
        .row(17, leasing_row("Ann Lee", "ann@x.com", 17))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    let grouped: Vec<_> = inquiries
        .iter()
        .map(|i| (i.property.clone().unwrap(), i.name.clone().unwrap()))
        .collect();
    assert_eq!(
        grouped,
        vec![
            ("Sunset Apartments".to_string(), "Jane Doe".to_string()),
            ("Sunset Apartments".to_string(), "John Roe".to_string()),
            ("Oak Ridge".to_string(), "Ann Lee".to_string()),
        ]
    );
}

#[test]
fn test_data_rows_before_any_property_are_dropped() {
    let bytes = report_skeleton(false)
        .row(12, leasing_row("Early Bird", "early@x.com", 14))
        .cell(13, 0, XCell::Text("Sunset Apartments"))
        .row(14, leasing_row("Jane Doe", "jane@x.com", 15))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].name.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_rows_above_data_start_are_ignored() {
    // 第 5 行看起来像数据行，但位于模板前导区
    let bytes = report_skeleton(false)
        .cell(4, 0, XCell::Text("Preamble Property"))
        .row(5, leasing_row("Preamble Lead", "pre@x.com", 10))
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .row(13, leasing_row("Jane Doe", "jane@x.com", 15))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].property.as_deref(), Some("Sunset Apartments"));
}

#[test]
fn test_row_without_native_date_is_not_data() {
    let bytes = report_skeleton(false)
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .cell(13, 0, XCell::Text("Total Inquiries"))
        .cell(13, 3, XCell::Text("2026-01-15"))
        .row(14, leasing_row("Jane Doe", "jane@x.com", 15))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].name.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_inquiry_id_column_located_by_header() {
    let bytes = report_skeleton(true)
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .row(13, leasing_row("Jane Doe", "jane@x.com", 15))
        .cell(13, 15, XCell::Text("INQ-42"))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();

    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].inquiry_id.as_deref(), Some("INQ-42"));
}

#[test]
fn test_optional_dates_and_numbers() {
    // 第 8 列（入住偏好）留空
    let bytes = report_skeleton(false)
        .cell(12, 0, XCell::Text("Sunset Apartments"))
        .row(13, leasing_row("Jane Doe", "jane@x.com", 15))
        .cell(13, 4, XCell::DateTime(2026, 1, 16, 9, 0))
        .cell(13, 5, XCell::Text("pending"))
        .cell(13, 6, XCell::Text("Email"))
        .cell(13, 7, XCell::Text("Active"))
        .cell(13, 9, XCell::Number(1500.0))
        .build();

    let inquiries = parse_leasing_excel(&bytes).unwrap();
    let jane = &inquiries[0];

    assert_eq!(jane.first_contact.as_deref(), Some("2026-01-16"));
    assert_eq!(jane.last_activity_date.as_deref(), Some("pending"));
    assert_eq!(jane.last_activity_type.as_deref(), Some("Email"));
    assert_eq!(jane.status.as_deref(), Some("Active"));
    assert_eq!(jane.move_in_preference, None);
    assert_eq!(jane.max_rent.as_deref(), Some("1500"));
}

#[test]
fn test_garbage_bytes_are_excel_error() {
    let result = parse_leasing_excel(b"not a workbook");
    assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
}
