use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::Result;
use cadastro_config::AppConfig;
use cadastro_lookup::Address;
use clap::Args;

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Postal code, with or without the mask (01310-100 or 01310100).
    pub cep: String,
}

pub fn lookup_cep(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    match resolve_address(ctx.config, &args.cep)? {
        Some(address) => {
            if ctx.json {
                print_json(&address)?;
            } else {
                println!("street:       {}", address.street);
                println!("neighborhood: {}", address.neighborhood);
                println!("city:         {}", address.city);
                println!("region:       {}", address.region);
            }
            Ok(())
        }
        None => Err(not_found(format!("cep {} not found", args.cep))),
    }
}

#[cfg(feature = "viacep")]
pub fn resolve_address(config: &AppConfig, cep: &str) -> Result<Option<Address>> {
    use cadastro_lookup::{CepLookup, ViaCep};

    let client = ViaCep::new(config.lookup.base_url.clone());
    Ok(client.lookup(cep)?)
}

#[cfg(not(feature = "viacep"))]
pub fn resolve_address(_config: &AppConfig, _cep: &str) -> Result<Option<Address>> {
    Err(crate::error::invalid_input(
        "this build has no viacep support; pass the address fields explicitly",
    ))
}
