//! Build script to generate the embedded company catalog
//!
//! Reads the tab-separated company table and generates Rust source code with a const array.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Number of tab-separated columns per company row
const COLUMNS: usize = 10;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_company_table(
        "data/companies.tsv",
        &Path::new(&out_dir).join("companies.rs"),
        "COMPANY_ROWS",
        "Bundled company catalog rows (id, name, industry, founded, headquarters, ceo, revenue, employees, colors, slogan)",
    );

    // Rebuild if the catalog changes
    println!("cargo:rerun-if-changed=data/companies.tsv");
}

fn generate_company_table(
    input_path: &str,
    output_path: &Path,
    const_name: &str,
    doc_comment: &str,
) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let rows: Vec<Vec<&str>> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| line.split('\t').collect())
        .collect();

    for (i, row) in rows.iter().enumerate() {
        assert!(
            row.len() == COLUMNS,
            "{input_path}: row {} has {} columns, expected {COLUMNS}",
            i + 1,
            row.len()
        );
    }

    let count = rows.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated company catalog").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment}").unwrap();
    writeln!(output, "pub const {const_name}: &[[&str; {COLUMNS}]] = &[").unwrap();

    for row in rows {
        let fields: Vec<String> = row.iter().map(|field| format!("{:?}", field.trim())).collect();
        writeln!(output, "    [{}],", fields.join(", ")).unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of rows in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
