//! Report rendering for stdout.

use crate::OutputFormat;
use anyhow::Result;
use contacts_core::{Contact, ContactListing};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    contacts: &'a [ContactListing],
    city: &'a str,
    outside_city: Vec<&'a str>,
}

pub(crate) fn render(
    format: OutputFormat,
    listing: &[ContactListing],
    city: &str,
    excluded: &[Contact],
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(listing, city, excluded)?),
        OutputFormat::Json => {
            let report = JsonReport {
                contacts: listing,
                city,
                outside_city: excluded.iter().map(|c| c.name.as_str()).collect(),
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_text(
    listing: &[ContactListing],
    city: &str,
    excluded: &[Contact],
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "All Contacts:")?;
    for contact in listing {
        writeln!(
            out,
            "- {} (Addresses: {})",
            contact.name, contact.address_count
        )?;
        for address in &contact.addresses {
            writeln!(out, "    {}, {}", address.street, address.city)?;
        }
    }

    writeln!(out, "\nContacts not in '{city}':")?;
    for contact in excluded {
        writeln!(out, "- {}", contact.name)?;
    }
    Ok(out)
}
