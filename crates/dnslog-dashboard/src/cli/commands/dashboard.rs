//! `dnslog-dashboard dashboard` - the analytics page.
//!
//! Renders the Unique IP and All Data panels, then the Visualizations
//! section. With `--mode` (or without a terminal) the section is rendered
//! once; otherwise the user picks filters until they choose Quit. Every
//! pick issues a fresh request.

use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input, Select};
use dnslog_client::DnsLogClient;
use dnslog_core::UniqueIps;
use std::io::IsTerminal;
use tracing::{debug, warn};

use super::{with_spinner, Context};
use crate::cli::args::DashboardArgs;
use crate::controls::{FilterMode, Selection, BYTES_SLIDER};
use crate::output::{self, ViewSettings};
use crate::panel;

const TITLE: &str = "DNS Log Analytics";

pub async fn execute(ctx: Context, args: DashboardArgs) -> Result<()> {
    let client = ctx.client()?;

    println!("{}", TITLE.bold().cyan());
    println!("{} {}", "API_HOST:".dimmed(), client.base_url().dimmed());

    let (text, unique) = panel::render(
        "Unique IP",
        with_spinner("Fetching unique IPs", client.data().unique_ips()).await,
        |u| output::unique_pretty(u, ctx.view.max_rows),
    );
    print!("{text}");

    let (text, _) = panel::render(
        "All Data",
        with_spinner("Fetching all data", client.data().all()).await,
        |t| output::table_pretty(t, ctx.view.max_rows),
    );
    print!("{text}");

    print!("{}", panel::heading("Visualizations"));

    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    match args.mode {
        Some(mode) => {
            if let Some(selection) = preset(mode, &args, unique.as_ref()) {
                render_selection(&client, &selection, ctx.view).await;
            }
        }
        None if !interactive => {
            debug!("no terminal, rendering the default filter");
            if let Some(selection) = preset(FilterMode::ByIp, &args, unique.as_ref()) {
                render_selection(&client, &selection, ctx.view).await;
            }
        }
        None => prompt_loop(&client, unique.as_ref(), ctx.view).await?,
    }

    Ok(())
}

/// Build the selection for a non-interactive render.
fn preset(mode: FilterMode, args: &DashboardArgs, unique: Option<&UniqueIps>) -> Option<Selection> {
    match mode {
        FilterMode::ByBytes => {
            let requested = args.threshold.unwrap_or(BYTES_SLIDER.min);
            let threshold = BYTES_SLIDER.snap(requested);
            if threshold != requested {
                warn!(requested, threshold, "threshold snapped to slider position");
            }
            Some(Selection::Bytes(threshold))
        }
        FilterMode::ByIp => {
            let ip = args
                .ip
                .clone()
                .or_else(|| unique.and_then(|u| u.uniqueips.first().cloned()));
            if ip.is_none() {
                print!("{}", no_ips_body());
            }
            ip.map(Selection::Ip)
        }
    }
}

async fn prompt_loop(
    client: &DnsLogClient,
    unique: Option<&UniqueIps>,
    view: ViewSettings,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut items: Vec<String> = FilterMode::ALL.iter().map(ToString::to_string).collect();
    items.push("Quit".to_string());

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Select Filter")
            .items(&items)
            .default(0)
            .interact()?;

        let selection = match FilterMode::ALL.get(choice) {
            None => break,
            Some(FilterMode::ByBytes) => {
                let threshold: u64 = Input::with_theme(&theme)
                    .with_prompt("Subset Data By Bytes Greater Than")
                    .default(BYTES_SLIDER.min)
                    .validate_with(|v: &u64| BYTES_SLIDER.validate(*v))
                    .interact_text()?;
                Selection::Bytes(threshold)
            }
            Some(FilterMode::ByIp) => {
                let ips = unique.map(|u| u.uniqueips.as_slice()).unwrap_or_default();
                if ips.is_empty() {
                    print!("{}", no_ips_body());
                    continue;
                }
                let index = FuzzySelect::with_theme(&theme)
                    .with_prompt("IP")
                    .items(ips)
                    .default(0)
                    .interact()?;
                Selection::Ip(ips[index].clone())
            }
        };

        render_selection(client, &selection, view).await;
    }

    Ok(())
}

async fn render_selection(client: &DnsLogClient, selection: &Selection, view: ViewSettings) {
    let data = client.data();
    let result = match selection {
        Selection::Bytes(threshold) => with_spinner("Filtering by bytes", data.above(*threshold)).await,
        Selection::Ip(ip) => with_spinner("Filtering by IP", data.by_ip(ip)).await,
    };
    let (text, _) = panel::render(&selection.to_string(), result, |t| {
        output::filtered_pretty(t, view)
    });
    print!("{text}");
}

fn no_ips_body() -> String {
    format!(
        "  {} {}\n",
        "Error:".red().bold(),
        "no unique IPs available to filter by"
    )
}
