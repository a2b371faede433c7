use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook, open_workbook_from_rs};
use pretty_assertions::assert_eq;
use xlsx_response::excel::{Alignment, VerticalAlign};
use xlsx_response::response::MEDIA_TYPE;
use xlsx_response::{
    CellData, DataType, Html2RichText, Metadata, Spreadsheet, Style, Worksheet, XlsxResponse,
};

fn read_back(bytes: &[u8]) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(bytes.to_vec())).expect("readable xlsx")
}

fn sample_spreadsheet() -> xlsx_response::Result<Spreadsheet> {
    let metadata = Metadata::from_pairs([
        ("dc:identifier", "lorem-ipsum"),
        ("owl:versionInfo", "3.14"),
        ("dc:title", "Lorem ipsum"),
        ("dc:created", "2021-12-27"),
    ]);
    let mut spreadsheet = Spreadsheet::new(metadata)?.with_default_style(
        Style::new().with_alignment(Alignment {
            vertical: Some(VerticalAlign::Top),
            ..Default::default()
        }),
    );

    let sheet = spreadsheet.add_sheet(Worksheet::new("lorem-ipsum")?, None)?;
    sheet
        .set_coordinate("B2")?
        .write_row(["Name", "Amount", "Paid"], Some(&Style::bold()))?
        .write_row(
            [
                CellData::new("Alice"),
                CellData::new(12.5),
                CellData::new(1).with_type(DataType::Bool),
            ],
            None,
        )?
        .write_row(
            [
                CellData::new("Bob"),
                CellData::new("7").with_type(DataType::Number),
                CellData::new(false),
            ],
            None,
        )?
        .write_cell_at("C5", CellData::new("=SUM(C3:C4)").with_type(DataType::Formula))?;

    let rich_text = Html2RichText::new().create("<b>Total</b> due")?;
    sheet.write_cell_at("B5", rich_text)?;

    spreadsheet.create_sheet()?.write_col([1, 2, 3], None)?;

    Ok(spreadsheet)
}

#[test]
fn test_values_read_back() -> xlsx_response::Result<()> {
    let bytes = sample_spreadsheet()?.to_xlsx_buffer()?;
    let mut workbook = read_back(&bytes);

    assert_eq!(workbook.sheet_names(), ["lorem-ipsum", "Worksheet"]);

    let range = workbook.worksheet_range("lorem-ipsum").expect("first sheet");
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Name".to_string())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("Paid".to_string())));
    assert_eq!(range.get_value((2, 2)), Some(&Data::Float(12.5)));
    assert_eq!(range.get_value((2, 3)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((3, 2)), Some(&Data::Float(7.0)));
    assert_eq!(range.get_value((3, 3)), Some(&Data::Bool(false)));
    assert_eq!(range.get_value((4, 1)), Some(&Data::String("Total due".to_string())));

    let formulas = workbook.worksheet_formula("lorem-ipsum").expect("formulas");
    assert_eq!(formulas.get_value((4, 2)).map(String::as_str), Some("SUM(C3:C4)"));

    let range = workbook.worksheet_range("Worksheet").expect("second sheet");
    let column: Vec<Data> = (0..3)
        .filter_map(|row| range.get_value((row, 0)).cloned())
        .collect();
    assert_eq!(column, [Data::Float(1.0), Data::Float(2.0), Data::Float(3.0)]);

    Ok(())
}

#[test]
fn test_empty_spreadsheet_has_default_sheet() -> xlsx_response::Result<()> {
    let bytes = Spreadsheet::new(Metadata::new())?.to_xlsx_buffer()?;
    let workbook = read_back(&bytes);

    assert_eq!(workbook.sheet_names(), ["Worksheet"]);
    Ok(())
}

#[test]
fn test_save_to_file() -> xlsx_response::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.xlsx");

    sample_spreadsheet()?.save(&path)?;

    let workbook: Xlsx<_> = open_workbook(&path).expect("saved file opens");
    assert_eq!(workbook.sheet_names().len(), 2);
    Ok(())
}

#[test]
fn test_response_emit() -> xlsx_response::Result<()> {
    let spreadsheet = sample_spreadsheet()?;
    let response = XlsxResponse::new(&spreadsheet)?;

    assert_eq!(response.filename(), "lorem-ipsum_3.14.xlsx");

    let mut out = Vec::new();
    response.emit(&mut out)?;

    let expected_head = format!(
        "Content-Type: {MEDIA_TYPE}\r\n\
         Content-Disposition: attachment; filename=\"lorem-ipsum_3.14.xlsx\"\r\n\
         Content-Length: {}\r\n\r\n",
        response.body().len()
    );
    assert_eq!(String::from_utf8_lossy(&out[..expected_head.len()]), expected_head);

    let body = &out[expected_head.len()..];
    assert_eq!(body, response.body());

    let mut workbook = read_back(body);
    assert_eq!(workbook.sheet_names()[0], "lorem-ipsum");
    assert!(workbook.worksheet_range("lorem-ipsum").is_ok());

    assert_eq!(
        spreadsheet
            .properties()
            .custom_property("Version")
            .map(ToString::to_string),
        Some("3.14".to_string())
    );

    Ok(())
}
