//! Host form definitions
//!
//! A `Form` is rows of typed fields laid out in a fixed number of columns.
//! `to_page` materializes it into the element model the lookup widget and
//! serializer work on, one field group per reference field.

mod builder;
mod field;

pub use builder::FormBuilder;
pub use field::{DateField, Field, NumberField, ReferenceField, SelectField, SelectOption, TextField};

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::LookupError;
use crate::page::{ATTR_LOOKUP_URL, ATTR_REF_CODE, Element, ElementKind, Page};

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    columns: usize,
    rows: Vec<Vec<Field>>,
}

#[derive(Deserialize)]
struct FormFile {
    #[serde(default = "default_columns")]
    columns: usize,
    #[serde(default)]
    rows: Vec<RowFile>,
}

#[derive(Deserialize)]
struct RowFile {
    #[serde(default)]
    fields: Vec<Field>,
}

fn default_columns() -> usize {
    1
}

impl Form {
    /// Empty form with a single empty row
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: vec![Vec::new()],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Field>] {
        &self.rows
    }

    /// Append to the current (last) row
    pub fn add(&mut self, field: impl Into<Field>) {
        match self.rows.last_mut() {
            Some(row) => row.push(field.into()),
            None => self.rows.push(vec![field.into()]),
        }
    }

    /// Start a new row, unless the current one is still empty
    pub fn new_line(&mut self) {
        if self.rows.last().is_none_or(|row| !row.is_empty()) {
            self.rows.push(Vec::new());
        }
    }

    /// All fields in row order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.rows.iter().flatten()
    }

    /// Parse a TOML definition. Rows are joined with `new_line`, so an empty
    /// `[[rows]]` entry does not produce a row of its own.
    pub fn from_toml_str(text: &str) -> Result<Self, LookupError> {
        let file: FormFile =
            toml::from_str(text).map_err(|e| LookupError::FormDefinition(e.to_string()))?;

        let mut form = Form::new(file.columns.max(1));
        for (idx, row) in file.rows.into_iter().enumerate() {
            if idx > 0 {
                form.new_line();
            }
            for field in row.fields {
                form.add(field);
            }
        }
        Ok(form)
    }

    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LookupError::FormDefinition(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let form = Self::from_toml_str(&text)?;
        debug!("Loaded form with {} fields from {}", form.fields().count(), path.display());
        Ok(form)
    }

    /// Build the host page for this form
    pub fn to_page(&self) -> Page {
        let mut page = Page::new();

        for field in self.fields() {
            match field {
                Field::Text(f) => {
                    let mut input = Element::text_input(&f.name).with_value(&f.value);
                    if let Some(max) = f.max_length {
                        input = input.with_attr("maxlength", max.to_string());
                    }
                    page.insert(input);
                }
                Field::Number(f) => {
                    let mut input = Element::text_input(&f.name)
                        .with_value(f.value.map(|v| v.to_string()).unwrap_or_default());
                    if let Some(min) = f.min {
                        input = input.with_attr("min", min.to_string());
                    }
                    if let Some(max) = f.max {
                        input = input.with_attr("max", max.to_string());
                    }
                    page.insert(input);
                }
                Field::Date(f) => {
                    page.insert(Element::text_input(&f.name).with_value(&f.value));
                }
                Field::Select(f) => {
                    page.insert(
                        Element::new(ElementKind::Select)
                            .with_name(&f.name)
                            .with_value(f.current_value()),
                    );
                }
                Field::Reference(f) => materialize_reference(&mut page, f),
            }
        }

        page
    }
}

fn materialize_reference(page: &mut Page, field: &ReferenceField) {
    let group = page.add_group();

    let mut control = Element::open_control(&field.lookup_url);
    if !field.reference_key.is_empty() {
        control = control.with_attr(ATTR_REF_CODE, &field.reference_key);
    }
    page.insert_into(group, control);
    page.insert_into(
        group,
        Element::text_input(format!("{}_code", field.name))
            .with_value(&field.code)
            .with_attr(ATTR_LOOKUP_URL, &field.lookup_url),
    );
    page.insert_into(group, Element::name_display().with_value(&field.display_name));
    page.insert_into(group, Element::hidden_input(&field.name).with_value(&field.id_value));
}
