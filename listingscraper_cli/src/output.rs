use anyhow::Result;
use serde::Serialize;
use listingscraper_lib::ListingRecord;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct OfficeRow {
    #[tabled(rename = "Office")]
    #[serde(rename = "Office")]
    name: String,
    #[tabled(rename = "Office ID")]
    #[serde(rename = "Office ID")]
    office_id: String,
}

#[derive(Tabled, Serialize)]
struct ListingIdRow {
    #[tabled(rename = "#")]
    #[serde(rename = "#")]
    position: usize,
    #[tabled(rename = "Listing ID")]
    #[serde(rename = "Listing ID")]
    listing_id: String,
}

#[derive(Tabled, Serialize)]
struct ListingRow {
    #[tabled(rename = "Listing ID")]
    #[serde(rename = "Listing ID")]
    listing_id: String,
    #[tabled(rename = "Heading")]
    #[serde(rename = "Heading")]
    heading: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Address")]
    #[serde(rename = "Address")]
    address: String,
    #[tabled(rename = "Agency ID")]
    #[serde(rename = "Agency ID")]
    agency_id: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
}

// -- Row builders --

fn build_office_rows(offices: &[(&str, &str)]) -> Vec<OfficeRow> {
    offices
        .iter()
        .map(|(name, id)| OfficeRow {
            name: name.to_string(),
            office_id: id.to_string(),
        })
        .collect()
}

fn build_listing_id_rows(ids: &[String]) -> Vec<ListingIdRow> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| ListingIdRow {
            position: i + 1,
            listing_id: id.clone(),
        })
        .collect()
}

fn build_listing_rows(records: &[ListingRecord]) -> Vec<ListingRow> {
    records
        .iter()
        .map(|r| ListingRow {
            listing_id: r.listing_id.clone(),
            heading: r.heading.trim().to_string(),
            price: r.price.clone(),
            address: r.address.join(", "),
            agency_id: r.agency_id.clone(),
            description: truncate(r.description.trim(), 60),
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_offices(offices: &[(&str, &str)], format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        let map: serde_json::Map<String, serde_json::Value> = offices
            .iter()
            .map(|(name, id)| (name.to_string(), serde_json::Value::from(*id)))
            .collect();
        print_json(&map);
        return Ok(());
    }
    print_rows(build_office_rows(offices), format)
}

pub fn print_listing_ids(ids: &[String], format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(&ids);
        return Ok(());
    }
    print_rows(build_listing_id_rows(ids), format)
}

/// JSON keeps the full record (ordered address array, untruncated text);
/// the tabular formats flatten it.
pub fn print_listings(records: &[ListingRecord], format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(&records);
        return Ok(());
    }
    print_rows(build_listing_rows(records), format)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
