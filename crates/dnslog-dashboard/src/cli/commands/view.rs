//! `dnslog-dashboard all|unique|bytes|ip` - print one view for scripting.

use anyhow::Result;

use super::{with_spinner, Context};
use crate::output;

pub async fn all(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let table = with_spinner("Fetching all data", client.data().all()).await?;
    print!("{}", output::format_table(&table, ctx.output_format, ctx.view)?);
    Ok(())
}

pub async fn unique(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let unique = with_spinner("Fetching unique IPs", client.data().unique_ips()).await?;
    print!("{}", output::format_unique(&unique, ctx.output_format, ctx.view)?);
    Ok(())
}

pub async fn bytes(ctx: Context, threshold: u64) -> Result<()> {
    let client = ctx.client()?;
    let table = with_spinner("Filtering by bytes", client.data().above(threshold)).await?;
    print!("{}", output::format_table(&table, ctx.output_format, ctx.view)?);
    Ok(())
}

pub async fn ip(ctx: Context, ip: &str) -> Result<()> {
    let client = ctx.client()?;
    let table = with_spinner("Filtering by IP", client.data().by_ip(ip)).await?;
    print!("{}", output::format_table(&table, ctx.output_format, ctx.view)?);
    Ok(())
}
