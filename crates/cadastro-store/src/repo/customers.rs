use crate::error::{Result, StoreError};
use cadastro_core::{strip_digits, Customer, CustomerDraft, CustomerId};
use rusqlite::{params, Connection};
use std::str::FromStr;

pub struct CustomersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CustomersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persists a normalized draft as a new customer. The draft must come
    /// out of `cadastro_core::normalize`; a CPF already on file is
    /// rejected with [`StoreError::DuplicateCpf`].
    pub fn create(&self, now_utc: i64, draft: CustomerDraft) -> Result<Customer> {
        let tx = self.conn.unchecked_transaction()?;
        let customer = create_inner(&tx, now_utc, draft)?;
        tx.commit()?;
        Ok(customer)
    }

    pub fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        get_inner(self.conn, id)
    }

    /// Replaces every field of an existing record, mirroring a full-form
    /// submit. Keeps `id` and `created_at`, bumps `updated_at`.
    pub fn update(&self, now_utc: i64, id: CustomerId, draft: CustomerDraft) -> Result<Customer> {
        let tx = self.conn.unchecked_transaction()?;
        let customer = update_inner(&tx, now_utc, id, draft)?;
        tx.commit()?;
        Ok(customer)
    }

    pub fn delete(&self, id: CustomerId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM customers WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Exact match on the digits of `cpf`; mask punctuation in the input
    /// is tolerated. At most one row can match thanks to the unique index.
    pub fn list_by_cpf(&self, cpf: &str) -> Result<Vec<Customer>> {
        let stripped = strip_digits(cpf);
        if stripped.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, name, cpf, email, phone, cep, street, number, complement, neighborhood, city, region, created_at, updated_at
             FROM customers WHERE cpf = ?1;",
        )?;
        let mut rows = stmt.query([stripped])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(customer_from_row(row)?);
        }
        Ok(customers)
    }

    /// Case-insensitive substring match on the name, most recently updated
    /// first. Callers that only want a single record take the head of the
    /// list.
    pub fn list_by_name(&self, name: &str) -> Result<Vec<Customer>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("%{}%", escape_like(trimmed));
        let mut stmt = self.conn.prepare(
            "SELECT id, name, cpf, email, phone, cep, street, number, complement, neighborhood, city, region, created_at, updated_at
             FROM customers
             WHERE name LIKE ?1 ESCAPE '\\' COLLATE NOCASE
             ORDER BY updated_at DESC, name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([pattern])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(customer_from_row(row)?);
        }
        Ok(customers)
    }

    /// Every customer, name-ordered.
    pub fn list_all(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, cpf, email, phone, cep, street, number, complement, neighborhood, city, region, created_at, updated_at
             FROM customers
             ORDER BY name COLLATE NOCASE ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(customer_from_row(row)?);
        }
        Ok(customers)
    }
}

fn create_inner(conn: &Connection, now_utc: i64, draft: CustomerDraft) -> Result<Customer> {
    let customer = customer_from_draft(CustomerId::new(), now_utc, now_utc, draft);
    customer.validate()?;

    if find_id_by_cpf(conn, &customer.cpf)?.is_some() {
        return Err(StoreError::DuplicateCpf(customer.cpf.clone()));
    }

    conn.execute(
        "INSERT INTO customers (id, name, cpf, email, phone, cep, street, number, complement, neighborhood, city, region, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14);",
        params![
            customer.id.to_string(),
            customer.name,
            customer.cpf,
            customer.email,
            customer.phone,
            customer.cep,
            customer.street,
            customer.number,
            customer.complement,
            customer.neighborhood,
            customer.city,
            customer.region,
            customer.created_at,
            customer.updated_at,
        ],
    )?;

    Ok(customer)
}

fn update_inner(
    conn: &Connection,
    now_utc: i64,
    id: CustomerId,
    draft: CustomerDraft,
) -> Result<Customer> {
    let existing = get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    let customer = customer_from_draft(id, existing.created_at, now_utc, draft);
    customer.validate()?;

    if let Some(owner) = find_id_by_cpf(conn, &customer.cpf)? {
        if owner != id {
            return Err(StoreError::DuplicateCpf(customer.cpf.clone()));
        }
    }

    conn.execute(
        "UPDATE customers
         SET name = ?2, cpf = ?3, email = ?4, phone = ?5, cep = ?6, street = ?7, number = ?8, complement = ?9, neighborhood = ?10, city = ?11, region = ?12, updated_at = ?13
         WHERE id = ?1;",
        params![
            customer.id.to_string(),
            customer.name,
            customer.cpf,
            customer.email,
            customer.phone,
            customer.cep,
            customer.street,
            customer.number,
            customer.complement,
            customer.neighborhood,
            customer.city,
            customer.region,
            customer.updated_at,
        ],
    )?;

    Ok(customer)
}

fn get_inner(conn: &Connection, id: CustomerId) -> Result<Option<Customer>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cpf, email, phone, cep, street, number, complement, neighborhood, city, region, created_at, updated_at
         FROM customers WHERE id = ?1;",
    )?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(customer_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn find_id_by_cpf(conn: &Connection, cpf: &str) -> Result<Option<CustomerId>> {
    let mut stmt = conn.prepare("SELECT id FROM customers WHERE cpf = ?1;")?;
    let mut rows = stmt.query([cpf])?;
    if let Some(row) = rows.next()? {
        let id_str: String = row.get(0)?;
        let id =
            CustomerId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
        Ok(Some(id))
    } else {
        Ok(None)
    }
}

fn customer_from_draft(
    id: CustomerId,
    created_at: i64,
    updated_at: i64,
    draft: CustomerDraft,
) -> Customer {
    Customer {
        id,
        name: draft.name,
        cpf: draft.cpf,
        email: draft.email,
        phone: draft.phone,
        cep: draft.cep,
        street: draft.street,
        number: draft.number,
        complement: draft.complement,
        neighborhood: draft.neighborhood,
        city: draft.city,
        region: draft.region,
        created_at,
        updated_at,
    }
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn customer_from_row(row: &rusqlite::Row<'_>) -> Result<Customer> {
    let id_str: String = row.get(0)?;
    let id = CustomerId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(Customer {
        id,
        name: row.get(1)?,
        cpf: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        cep: row.get(5)?,
        street: row.get(6)?,
        number: row.get(7)?,
        complement: row.get(8)?,
        neighborhood: row.get(9)?,
        city: row.get(10)?,
        region: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}
