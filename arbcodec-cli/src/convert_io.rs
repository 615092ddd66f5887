//! `convert io`: POEditor JSON on stdin, ARB on stdout.

use std::io::Read;

use anyhow::{Context, Result};
use arbcodec::convert::poe_to_arb::{Converter, ConverterOptions};
use arbcodec::Locale;

use crate::ConvertIoArgs;

pub fn run(args: &ConvertIoArgs) -> Result<()> {
    let locale: Locale = args
        .lang
        .parse()
        .with_context(|| format!("failed to parse locale {}", args.lang))?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading stdin")?;

    let converter = Converter::new(ConverterOptions {
        locale,
        template: !args.no_template,
        require_resource_attributes: true,
        term_prefix: args.term_prefix.clone(),
    });

    converter.convert(&input, std::io::stdout().lock())?;
    Ok(())
}
