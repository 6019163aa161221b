//! Tests for reference data loading and normalization
//!
//! Also hosts the sample reference tables shared with the lookup tests.

pub mod store_tests;

use crate::reference::ReferenceData;
use crate::reference::table::RawTable;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const CHAPTER_HEADERS: &[&str] = &["Chapter", "Description", "Section", "Notes"];
pub const CHAPTER_ROWS: &[&[&str]] = &[
    &["1", "Live animals", "Section I", ""],
    &["9", "Coffee, tea, mate and spices", "", ""],
    &["94", "Furniture; bedding, mattresses", "Section XX", ""],
];

pub const HTS_HEADERS: &[&str] = &[
    "HTS Number - Full",
    "HTS Long Description",
    "PGA Name Code",
    "PGA Flag Code",
    "PGA Flag",
    "PGA Program Code",
    "Effective Begin Date",
    "Change Pending Status",
];
pub const HTS_ROWS: &[&[&str]] = &[
    &[
        "0101210010",
        "Purebred breeding horses",
        "APH",
        "AL1",
        "Animal lab",
        "APL",
        "2024-03-05",
        "",
    ],
    &[
        "0101210010",
        "Purebred breeding horses",
        " FDA ",
        "FD2",
        "Food",
        "",
        "2024-03-05",
        "",
    ],
    &["0901110010", "Coffee, not roasted", "fda", "fd1 ", "Food", "FOO", "", ""],
    &["0901110010", "Coffee, not roasted", "USD", "XX9", "Unknown", "ZZZ", "", ""],
    &["01012100", "Horses (heading row)", "APH", "AL1", "Animal lab", "APL", "", ""],
];

pub const PGA_HEADERS: &[&str] = &[
    "Agency Code",
    "Code",
    "Program Code",
    "PGA Flag",
    "R= Required\n M = May be required",
    "Tariff Flag Code Definition",
    "PGA Compliance Message (see final in shared google drive) ",
    "Summary of Requirements",
    "Conditions to Disclaim",
    "List of Documents Required",
    "Guidance",
    "CFR Link",
    "Website Link",
];
pub const PGA_ROWS: &[&[&str]] = &[
    &[
        "APH",
        "AL1",
        "APL",
        "APHIS Lacey Act",
        "R",
        "Data required",
        "Provide Lacey Act data",
        "Plant products",
        "",
        "PPQ 505",
        "See APHIS guidance",
        "https://www.ecfr.gov/title-7",
        "https://www.aphis.usda.gov",
    ],
    &[
        "FDA ",
        "FD1",
        "FOO",
        "FDA food",
        "M",
        "Data may be required",
        " Prior notice ",
        "Food facility registration",
        "Not for human consumption",
        "Prior Notice confirmation",
        "",
        "https://www.ecfr.gov/title-21",
        "https://www.fda.gov",
    ],
    &[
        "FDA", "FD2", "", "FDA food", "R", "Data required", "Prior notice", "", "", "", "", "", "",
    ],
    &[
        "EPA", "EP1", "PS1", "EPA pesticides", "R", "Data required", "Pesticide notice", "", "",
        "", "", "", "",
    ],
];

pub const RULE_HEADERS: &[&str] = &["HsCode", "Description", "Rule", "Notes"];
pub const CHAPTER_1_RULES: &[&[&str]] = &[
    &["0101210010", "Purebred breeding horses", "Rule A", ""],
    &["0101290000", "Other horses", "Rule B", ""],
    &["0102210000", "Purebred breeding cattle", "Rule C", ""],
];
pub const HTS_CHAPTER_9_RULES: &[&[&str]] = &[&["0901110010", "Coffee, not roasted", "Rule K", ""]];
pub const CHAPTER_9_RULES: &[&[&str]] = &[&["0901110010", "Coffee (old sheet)", "Rule OLD", ""]];

pub fn sample_chapters() -> RawTable {
    RawTable::from_strs("HS_Chapters_lookup", CHAPTER_HEADERS, CHAPTER_ROWS)
}

pub fn sample_hts() -> RawTable {
    RawTable::from_strs("PGA_HTS", HTS_HEADERS, HTS_ROWS)
}

pub fn sample_pga() -> RawTable {
    RawTable::from_strs("PGA_codes", PGA_HEADERS, PGA_ROWS)
}

pub fn sample_rules() -> Vec<(String, RawTable)> {
    vec![
        (
            "Chapter 1".to_string(),
            RawTable::from_strs("hs_codes", RULE_HEADERS, CHAPTER_1_RULES),
        ),
        (
            "Notes".to_string(),
            RawTable::from_strs("hs_codes", &["Remark"], &[&["not a chapter sheet"]]),
        ),
        (
            "HTS Chapter 9".to_string(),
            RawTable::from_strs("hs_codes", RULE_HEADERS, HTS_CHAPTER_9_RULES),
        ),
        (
            "Chapter 9".to_string(),
            RawTable::from_strs("hs_codes", RULE_HEADERS, CHAPTER_9_RULES),
        ),
    ]
}

/// Snapshot built from the sample tables
pub fn sample_data() -> ReferenceData {
    ReferenceData::from_tables(sample_chapters(), sample_hts(), sample_pga(), sample_rules())
        .unwrap()
}

/// A worksheet to write: name, headers, rows and the columns written as numbers
pub struct SheetFixture<'a> {
    pub name: &'a str,
    pub headers: &'a [&'a str],
    pub rows: &'a [&'a [&'a str]],
    pub numeric_columns: &'a [&'a str],
}

impl<'a> SheetFixture<'a> {
    pub fn text(name: &'a str, headers: &'a [&'a str], rows: &'a [&'a [&'a str]]) -> Self {
        Self {
            name,
            headers,
            rows,
            numeric_columns: &[],
        }
    }
}

/// Write an xlsx workbook; empty strings leave the cell blank
pub fn write_workbook(path: &Path, sheets: &[SheetFixture]) {
    let mut workbook = Workbook::new();

    for fixture in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(fixture.name).unwrap();

        for (col, header) in fixture.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }

        for (row_idx, row) in fixture.rows.iter().enumerate() {
            let row_num = row_idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let numeric = fixture.numeric_columns.contains(&fixture.headers[col]);
                match value.parse::<f64>() {
                    Ok(number) if numeric => {
                        worksheet.write_number(row_num, col as u16, number).unwrap();
                    }
                    _ => {
                        worksheet.write_string(row_num, col as u16, *value).unwrap();
                    }
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Write the four sample reference files into `dir`
pub fn write_sample_data_dir(dir: &Path) {
    write_workbook(
        &dir.join("HS_Chapters_lookup.xlsx"),
        &[SheetFixture {
            name: "Chapters",
            headers: CHAPTER_HEADERS,
            rows: CHAPTER_ROWS,
            numeric_columns: &["Chapter"],
        }],
    );
    write_workbook(
        &dir.join("PGA_HTS.xlsx"),
        &[SheetFixture::text("PGA_HTS", HTS_HEADERS, HTS_ROWS)],
    );
    write_workbook(
        &dir.join("PGA_codes.xlsx"),
        &[SheetFixture::text("PGA_codes", PGA_HEADERS, PGA_ROWS)],
    );
    write_workbook(
        &dir.join("hs_codes.xlsx"),
        &[
            SheetFixture::text("Chapter 1", RULE_HEADERS, CHAPTER_1_RULES),
            SheetFixture::text("Notes", &["Remark"], &[&["not a chapter sheet"]]),
            SheetFixture::text("HTS Chapter 9", RULE_HEADERS, HTS_CHAPTER_9_RULES),
            SheetFixture::text("Chapter 9", RULE_HEADERS, CHAPTER_9_RULES),
        ],
    );
}
