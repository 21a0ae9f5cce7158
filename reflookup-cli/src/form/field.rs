//! Typed form field definitions
//!
//! Deserialized from TOML as `{ type = "text" | "number" | "date" | "select" | "reference", ... }`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    Date(DateField),
    Select(SelectField),
    Reference(ReferenceField),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Text(f) => &f.name,
            Field::Number(f) => &f.name,
            Field::Date(f) => &f.name,
            Field::Select(f) => &f.name,
            Field::Reference(f) => &f.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Field::Text(f) => &f.label,
            Field::Number(f) => &f.label,
            Field::Date(f) => &f.label,
            Field::Select(f) => &f.label,
            Field::Reference(f) => &f.label,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Field::Text(f) => f.icon.as_deref(),
            Field::Number(f) => f.icon.as_deref(),
            Field::Date(f) => f.icon.as_deref(),
            Field::Select(f) => f.icon.as_deref(),
            Field::Reference(f) => f.icon.as_deref(),
        }
    }

    /// Type tag, matching the `type` key of the TOML definition
    pub fn field_type(&self) -> &'static str {
        match self {
            Field::Text(_) => "text",
            Field::Number(_) => "number",
            Field::Date(_) => "date",
            Field::Select(_) => "select",
            Field::Reference(_) => "reference",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub value: String,
}

impl TextField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl NumberField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// ISO date as entered, e.g. `2024-05-01`
    #[serde(default)]
    pub value: String,
}

impl DateField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl SelectField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn selected(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Submitted value: the selected id, else the first option, else empty
    pub fn current_value(&self) -> &str {
        self.selected
            .as_deref()
            .or_else(|| self.options.first().map(|o| o.id.as_str()))
            .unwrap_or_default()
    }
}

/// Composite field: code input, read-only display name and a lookup control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceField {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub id_value: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub lookup_url: String,
    /// Contextual filter sent along with every lookup query
    #[serde(default)]
    pub reference_key: String,
}

impl ReferenceField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn id_value(mut self, id: impl Into<String>) -> Self {
        self.id_value = id.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn lookup_url(mut self, lookup_url: impl Into<String>) -> Self {
        self.lookup_url = lookup_url.into();
        self
    }

    pub fn reference_key(mut self, key: impl Into<String>) -> Self {
        self.reference_key = key.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

macro_rules! impl_into_field {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(field: $ty) -> Self {
                    Field::$variant(field)
                }
            }
        )*
    };
}

impl_into_field! {
    TextField => Text,
    NumberField => Number,
    DateField => Date,
    SelectField => Select,
    ReferenceField => Reference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_tags() {
        let fields: Vec<Field> = vec![
            TextField::new("a", "A").into(),
            NumberField::new("b", "B").into(),
            DateField::new("c", "C").into(),
            SelectField::new("d", "D").into(),
            ReferenceField::new("e", "E").into(),
        ];
        let tags: Vec<_> = fields.iter().map(Field::field_type).collect();
        assert_eq!(tags, vec!["text", "number", "date", "select", "reference"]);
        assert_eq!(fields[4].name(), "e");
        assert_eq!(fields[4].label(), "E");
    }

    #[test]
    fn test_select_current_value() {
        let select = SelectField::new("country", "Country");
        assert_eq!(select.current_value(), "");

        let select = select.options([SelectOption::new("be", "Belgium"), SelectOption::new("nl", "Netherlands")]);
        assert_eq!(select.current_value(), "be");
        assert_eq!(select.selected("nl").current_value(), "nl");
    }

    #[test]
    fn test_icon_is_optional() {
        let field: Field = TextField::new("street", "Street").icon("home").into();
        assert_eq!(field.icon(), Some("home"));
        assert_eq!(Field::from(DateField::new("born", "Born")).icon(), None);
    }
}
