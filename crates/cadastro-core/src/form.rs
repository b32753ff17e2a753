use crate::domain::cep::CEP_LEN;
use crate::domain::cpf::is_valid_cpf;
use crate::domain::customer::Customer;
use crate::domain::digits::strip_digits;
use crate::domain::email::is_valid_email;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw field set captured from a registration form. Values arrive exactly
/// as typed, mask punctuation included; nothing here is normalized yet.
///
/// `street`, `neighborhood`, `city` and `region` are usually filled from a
/// CEP lookup, but that is a convention of the calling shell, not
/// something this module enforces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
}

impl From<&Customer> for FormInput {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            cpf: customer.cpf.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            cep: customer.cep.clone(),
            street: customer.street.clone(),
            number: customer.number.clone(),
            complement: customer.complement.clone(),
            neighborhood: customer.neighborhood.clone(),
            city: customer.city.clone(),
            region: customer.region.clone(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Cpf,
    Email,
    Phone,
    Cep,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    Region,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Cpf => "cpf",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Cep => "cep",
            Field::Street => "street",
            Field::Number => "number",
            Field::Complement => "complement",
            Field::Neighborhood => "neighborhood",
            Field::City => "city",
            Field::Region => "region",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation outcome. A field absent from the map passed; an
/// empty map means the whole form is ready to normalize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

/// Runs every field check and reports all failures at once; there is no
/// short-circuiting, so a form with five bad fields comes back with five
/// entries.
pub fn validate(form: &FormInput) -> ValidationReport {
    let mut report = ValidationReport::default();

    require(&mut report, Field::Name, &form.name);

    if form.cpf.trim().is_empty() {
        report.push(Field::Cpf, "cpf is required");
    } else if !is_valid_cpf(&form.cpf) {
        report.push(Field::Cpf, "cpf is invalid");
    }

    if form.email.trim().is_empty() {
        report.push(Field::Email, "email is required");
    } else if !is_valid_email(&form.email) {
        report.push(Field::Email, "email is invalid");
    }

    // Presence only. CPF and CEP get digit-count checks, phone does not;
    // the original registry behaved this way.
    require(&mut report, Field::Phone, &form.phone);

    if form.cep.trim().is_empty() {
        report.push(Field::Cep, "cep is required");
    } else if strip_digits(&form.cep).len() != CEP_LEN {
        report.push(Field::Cep, "cep must contain 8 digits");
    }

    require(&mut report, Field::Street, &form.street);
    require(&mut report, Field::Number, &form.number);
    require(&mut report, Field::Neighborhood, &form.neighborhood);
    require(&mut report, Field::City, &form.city);
    require(&mut report, Field::Region, &form.region);

    report
}

fn require(report: &mut ValidationReport, field: Field, value: &str) {
    if value.trim().is_empty() {
        report.push(field, format!("{} is required", field));
    }
}

/// Persistence-facing shape of a record: identifiers stripped to digits,
/// everything else trimmed. Produced by [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
}

/// Pure transform from raw form input to the persistence shape. Does not
/// validate; run [`validate`] first and only normalize on an empty report.
pub fn normalize(form: &FormInput) -> CustomerDraft {
    CustomerDraft {
        name: form.name.trim().to_string(),
        cpf: strip_digits(&form.cpf),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        cep: strip_digits(&form.cep),
        street: form.street.trim().to_string(),
        number: form.number.trim().to_string(),
        complement: form.complement.trim().to_string(),
        neighborhood: form.neighborhood.trim().to_string(),
        city: form.city.trim().to_string(),
        region: form.region.trim().to_string(),
    }
}
