#![allow(dead_code)]

use order_sheet::ReferenceData;
use order_sheet::StoreRecord;
use std::io::Cursor;
use std::io::Write;
use url::Url;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const BASE_URL: &str = "http://warehouse.example/orion/ListaBodegaPedidosTienda.aspx";

pub fn reference() -> ReferenceData {
    ReferenceData::new(Url::parse(BASE_URL).unwrap())
        .with_columns(["PEDIDO", "TIENDA", "ANTIGUEDAD", "ESTADO"])
        .with_ignored_codes(["444"])
        .with_store(StoreRecord {
            customer: "Tienda Centro".to_owned(),
            code: "A1".to_owned(),
            id: 7,
        })
        .with_store(StoreRecord {
            customer: "Tienda Norte".to_owned(),
            code: "B2".to_owned(),
            id: 19,
        })
}

/// A cell written into the worksheet.
pub enum Cell<'a> {
    Shared(usize),
    Inline(&'a str),
    Number(&'a str),
    /// A number with the date style (`s="1"`)
    Date(&'a str),
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<numFmts count="1"><numFmt numFmtId="164" formatCode="dd/mm/yyyy\ hh:mm"/></numFmts>
<cellXfs count="3"><xf numFmtId="0"/><xf numFmtId="164"/><xf numFmtId="14"/></cellXfs>
</styleSheet>"#;

/// Builds an `.xlsx` package in memory. The first sheet holds `rows`; a second
/// sheet exists only to check that it is never read.
pub fn workbook(shared_strings: &[&str], rows: &[Vec<Cell>], date1904: bool) -> Vec<u8> {
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<workbookPr date1904="{}"/>
<sheets><sheet name="Pedidos" sheetId="1" r:id="rId1"/><sheet name="Otra" sheetId="2" r:id="rId2"/></sheets>
</workbook>"#,
        if date1904 { "1" } else { "0" }
    );

    let mut strings = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    for value in shared_strings {
        strings.push_str(&format!("<si><t>{value}</t></si>"));
    }
    strings.push_str("</sst>");

    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (row_index, row) in rows.iter().enumerate() {
        let number = row_index + 1;
        sheet.push_str(&format!(r#"<row r="{number}">"#));
        for (col_index, cell) in row.iter().enumerate() {
            let reference = format!("{}{number}", column_name(col_index));
            let xml = match cell {
                Cell::Shared(index) => format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#),
                Cell::Inline(text) => {
                    format!(r#"<c r="{reference}" t="inlineStr"><is><t>{text}</t></is></c>"#)
                }
                Cell::Number(value) => format!(r#"<c r="{reference}"><v>{value}</v></c>"#),
                Cell::Date(value) => format!(r#"<c r="{reference}" s="1"><v>{value}</v></c>"#),
            };
            sheet.push_str(&xml);
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let other_sheet = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>ignored</t></is></c></row></sheetData></worksheet>"#;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/sharedStrings.xml", &strings),
        ("xl/worksheets/sheet1.xml", &sheet),
        ("xl/worksheets/sheet2.xml", other_sheet),
    ];
    for (name, contents) in parts {
        zip.start_file(name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn column_name(index: usize) -> String {
    let mut name = String::new();
    let mut index = index + 1;
    while index > 0 {
        let rem = (index - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    name
}

/// The shipment export used across the integration tests.
pub fn shipment_export() -> Vec<u8> {
    let strings = ["ID DEL PEDIDO", "ANTIGUEDAD", "ESTADO", "A1-ENV-01-2", "B2-ENV-07-9"];
    workbook(
        &strings,
        &[
            vec![Cell::Shared(0), Cell::Shared(1), Cell::Shared(2)],
            vec![Cell::Shared(3), Cell::Date("45000.5"), Cell::Inline("Pendiente")],
            vec![Cell::Shared(3), Cell::Date("45001"), Cell::Inline("Duplicado")],
            vec![Cell::Shared(4), Cell::Number("45002.25"), Cell::Inline("Listo")],
            vec![Cell::Inline("444-ENV-01-3"), Cell::Number("45003"), Cell::Inline("Interno")],
            vec![Cell::Inline("Z9-ENV-01-5"), Cell::Number("45004"), Cell::Inline("Pendiente")],
        ],
        false,
    )
}
