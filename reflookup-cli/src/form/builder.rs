use super::Form;
use super::field::{DateField, Field, NumberField, ReferenceField, SelectField, TextField};

/// Fluent form construction
///
/// ```
/// use reflookup::FormBuilder;
///
/// let form = FormBuilder::new(2)
///     .text("street", "Street")
///     .reference(
///         FormBuilder::reference_field("postcode", "Postcode").lookup_url("/api/postcodes"),
///     )
///     .new_line()
///     .date("moved_in", "Moved in")
///     .build();
///
/// assert_eq!(form.rows().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder {
    form: Form,
}

impl FormBuilder {
    pub fn new(columns: usize) -> Self {
        Self {
            form: Form::new(columns),
        }
    }

    pub fn text(self, name: &str, label: &str) -> Self {
        self.field(TextField::new(name, label))
    }

    pub fn number(self, name: &str, label: &str, min: Option<i64>, max: Option<i64>) -> Self {
        self.field(NumberField::new(name, label).range(min, max))
    }

    pub fn date(self, name: &str, label: &str) -> Self {
        self.field(DateField::new(name, label))
    }

    pub fn select(self, field: SelectField) -> Self {
        self.field(field)
    }

    pub fn reference(self, field: ReferenceField) -> Self {
        self.field(field)
    }

    /// Add any configured field to the current row
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.form.add(field);
        self
    }

    pub fn new_line(mut self) -> Self {
        self.form.new_line();
        self
    }

    /// The form built so far
    pub fn current_form(&self) -> &Form {
        &self.form
    }

    pub fn build(self) -> Form {
        self.form
    }

    pub fn select_field(name: &str, label: &str) -> SelectField {
        SelectField::new(name, label)
    }

    pub fn reference_field(name: &str, label: &str) -> ReferenceField {
        ReferenceField::new(name, label)
    }
}
