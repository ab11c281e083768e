use tabled::{settings::Style, Table, Tabled};
use crate::reference::Reference;

#[derive(Tabled)]
pub struct ReferenceRow {
    #[tabled(rename = "Authors")]
    pub authors: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Publication")]
    pub publication: String,
}

impl From<&Reference> for ReferenceRow {
    fn from(reference: &Reference) -> Self {
        Self {
            authors: reference.authors.clone(),
            year: reference.year.map(|y| y.to_string()).unwrap_or_default(),
            title: reference.title.clone(),
            publication: reference.publication.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

pub fn references_table(references: &[Reference]) -> String {
    if references.is_empty() {
        return String::new();
    }

    let rows: Vec<ReferenceRow> = references.iter().map(ReferenceRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
