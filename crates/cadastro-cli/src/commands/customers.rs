use crate::commands::lookup::resolve_address;
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{format_timestamp, now_utc, parse_customer_id};
use anyhow::Result;
use cadastro_core::{
    mask_cep, mask_cpf, mask_phone, normalize, strip_digits, validate, Customer, FormInput,
    CEP_LEN, CPF_LEN,
};
use clap::{ArgAction, Args};
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub cpf: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub complement: Option<String>,
    #[arg(long)]
    pub neighborhood: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    /// Skip the CEP address lookup even when auto_fill is configured.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_lookup: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub cpf: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub complement: Option<String>,
    #[arg(long)]
    pub neighborhood: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_lookup: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Name substring, or a full CPF to search by tax id.
    pub query: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_customer(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let now = now_utc();
    let no_lookup = args.no_lookup;
    let mut form = FormInput {
        name: args.name.unwrap_or_default(),
        cpf: args.cpf.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        cep: args.cep.unwrap_or_default(),
        street: args.street.unwrap_or_default(),
        number: args.number.unwrap_or_default(),
        complement: args.complement.unwrap_or_default(),
        neighborhood: args.neighborhood.unwrap_or_default(),
        city: args.city.unwrap_or_default(),
        region: args.region.unwrap_or_default(),
    };

    if !no_lookup {
        fill_address_from_cep(ctx, &mut form)?;
    }
    ensure_valid(ctx, &form)?;

    let customer = ctx.store.customers().create(now, normalize(&form))?;
    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("created {} {}", customer.id, customer.name);
    }
    Ok(())
}

pub fn edit_customer(ctx: &Context<'_>, args: EditArgs) -> Result<()> {
    let now = now_utc();
    let id = parse_customer_id(&args.id)?;
    let existing = ctx
        .store
        .customers()
        .get(id)?
        .ok_or_else(|| not_found(format!("customer {} not found", id)))?;

    let mut form = FormInput::from(&existing);
    let cep_changed = args.cep.is_some();
    let address_given = args.street.is_some()
        || args.neighborhood.is_some()
        || args.city.is_some()
        || args.region.is_some();

    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(cpf) = args.cpf {
        form.cpf = cpf;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(cep) = args.cep {
        form.cep = cep;
    }
    if let Some(street) = args.street {
        form.street = street;
    }
    if let Some(number) = args.number {
        form.number = number;
    }
    if let Some(complement) = args.complement {
        form.complement = complement;
    }
    if let Some(neighborhood) = args.neighborhood {
        form.neighborhood = neighborhood;
    }
    if let Some(city) = args.city {
        form.city = city;
    }
    if let Some(region) = args.region {
        form.region = region;
    }

    // A new CEP with no explicit address means the old address is stale;
    // refill it from the lookup.
    if cep_changed && !address_given && !args.no_lookup {
        form.street.clear();
        form.neighborhood.clear();
        form.city.clear();
        form.region.clear();
        fill_address_from_cep(ctx, &mut form)?;
    }
    ensure_valid(ctx, &form)?;

    let customer = ctx.store.customers().update(now, id, normalize(&form))?;
    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("updated {} {}", customer.id, customer.name);
    }
    Ok(())
}

pub fn show_customer(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let customer = ctx
        .store
        .customers()
        .get(id)?
        .ok_or_else(|| not_found(format!("customer {} not found", id)))?;
    if ctx.json {
        print_json(&customer)?;
    } else {
        print_customer(&customer);
    }
    Ok(())
}

pub fn search_customers(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let query = args.query.trim().to_string();
    if query.is_empty() {
        return Err(invalid_input("search text is required"));
    }

    // Eleven digits is taken as a CPF, anything else as a name fragment.
    let matches = if strip_digits(&query).len() == CPF_LEN {
        ctx.store.customers().list_by_cpf(&query)?
    } else {
        ctx.store.customers().list_by_name(&query)?
    };
    debug!(query = %query, matches = matches.len(), "search finished");

    // First match wins; the rest are discarded. Documented behavior of
    // the registry this replaces, kept on purpose.
    let Some(customer) = matches.into_iter().next() else {
        return Err(not_found(format!("no customer matched \"{}\"", query)));
    };
    if ctx.json {
        print_json(&customer)?;
    } else {
        print_customer(&customer);
    }
    Ok(())
}

pub fn list_customers(ctx: &Context<'_>, _args: ListArgs) -> Result<()> {
    let customers = ctx.store.customers().list_all()?;
    if ctx.json {
        print_json(&customers)?;
    } else {
        for customer in &customers {
            println!(
                "{} {} {}",
                customer.id,
                mask_cpf(&customer.cpf),
                customer.name
            );
        }
    }
    Ok(())
}

pub fn delete_customer(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    ctx.store.customers().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

/// Runs form validation and turns a non-empty report into an
/// invalid-input error listing every failing field. In JSON mode the
/// report itself is printed first so callers can consume it per field.
fn ensure_valid(ctx: &Context<'_>, form: &FormInput) -> Result<()> {
    let report = validate(form);
    if report.is_valid() {
        return Ok(());
    }
    if ctx.json {
        print_json(&report)?;
    }
    let mut message = String::from("form validation failed");
    for (field, error) in report.iter() {
        message.push_str("\n  ");
        message.push_str(field.as_str());
        message.push_str(": ");
        message.push_str(error);
    }
    Err(invalid_input(message))
}

fn fill_address_from_cep(ctx: &Context<'_>, form: &mut FormInput) -> Result<()> {
    if !ctx.config.lookup.auto_fill {
        return Ok(());
    }
    let address_present = !form.street.trim().is_empty()
        || !form.neighborhood.trim().is_empty()
        || !form.city.trim().is_empty()
        || !form.region.trim().is_empty();
    // Malformed CEPs fall through to validation rather than the network.
    if address_present || strip_digits(&form.cep).len() != CEP_LEN {
        return Ok(());
    }

    match resolve_address(ctx.config, &form.cep)? {
        Some(address) => {
            debug!(cep = %form.cep, "address filled from lookup");
            form.street = address.street;
            form.neighborhood = address.neighborhood;
            form.city = address.city;
            form.region = address.region;
            Ok(())
        }
        None => Err(not_found(format!("cep {} not found", mask_cep(&form.cep)))),
    }
}

fn print_customer(customer: &Customer) {
    println!("{}", customer.id);
    println!("  name:         {}", customer.name);
    println!("  cpf:          {}", mask_cpf(&customer.cpf));
    println!("  email:        {}", customer.email);
    println!("  phone:        {}", mask_phone(&customer.phone));
    println!("  cep:          {}", mask_cep(&customer.cep));
    if customer.complement.is_empty() {
        println!("  address:      {}, {}", customer.street, customer.number);
    } else {
        println!(
            "  address:      {}, {} ({})",
            customer.street, customer.number, customer.complement
        );
    }
    println!("  neighborhood: {}", customer.neighborhood);
    println!("  city:         {} / {}", customer.city, customer.region);
    println!("  updated:      {}", format_timestamp(customer.updated_at));
}
