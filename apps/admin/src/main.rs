use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ArtistsApi, HttpArtistsClient};
use manage_artists::{
    ArtistListController, ControllerEvent, Notifier, PageChange, Toast, ToastSeverity,
};
use shared::protocol::ArtistDraft;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{Command, NextPage, HELP};

#[derive(Parser, Debug)]
#[command(about = "Interactive artist administration console")]
struct Args {
    #[arg(long, default_value = "admin.toml")]
    config: PathBuf,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    rows_per_page: Option<u32>,
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        match toast.severity {
            ToastSeverity::Success => println!("[ok] {}: {}", toast.summary, toast.detail),
            ToastSeverity::Error => eprintln!("[błąd] {}: {}", toast.summary, toast.detail),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config);
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(rows) = args.rows_per_page.filter(|rows| *rows > 0) {
        settings.rows_per_page = rows;
    }
    let base_url = settings.api_base_url()?;

    let api: Arc<dyn ArtistsApi> = Arc::new(
        HttpArtistsClient::with_timeout(
            base_url.as_str(),
            Duration::from_secs(settings.request_timeout_secs),
        )
        .context("failed to build artists http client")?,
    );
    info!(api = %base_url, rows_per_page = settings.rows_per_page, "starting artist admin");

    let (mut controller, mut events) =
        ArtistListController::new(api, Arc::new(ConsoleNotifier), settings.rows_per_page);
    println!("{HELP}");
    controller.mount();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle_command(&mut controller, command),
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some(event) = events.recv() => {
                let settled = matches!(event, ControllerEvent::FetchSettled { .. });
                controller.handle_event(event);
                if settled && !controller.state().loading() {
                    render::table(&controller.view());
                }
            }
        }
    }

    Ok(())
}

fn handle_command(controller: &mut ArtistListController, command: Command) {
    let page_size = controller.state().page_size();
    match command {
        Command::Search(text) => controller.set_search(text),
        Command::Filter => report_busy(controller.apply_filter()),
        Command::Reset => report_busy(controller.reset_filters()),
        Command::Page(page) => {
            report_busy(controller.change_page(PageChange::to_page(page, page_size)));
        }
        Command::Next => {
            let state = controller.state();
            let page_count = state.artists().map(|_| controller.view().page_count);
            match commands::next_page(state.loading(), state.page(), page_count) {
                NextPage::Go(page) => {
                    report_busy(controller.change_page(PageChange::to_page(page, page_size)));
                }
                NextPage::Busy => report_busy(false),
                NextPage::Last => println!("already on the last page"),
            }
        }
        Command::Prev => {
            let page = controller.state().page();
            if page > 1 {
                report_busy(controller.change_page(PageChange::to_page(page - 1, page_size)));
            } else {
                println!("already on the first page");
            }
        }
        Command::Refresh => {
            controller.refresh_list();
        }
        Command::Create(name) => {
            controller.open_create_dialog();
            let dialog = controller.create_dialog();
            controller.close_create_dialog();
            tokio::spawn(async move {
                let _ = dialog.submit(ArtistDraft::new(name)).await;
            });
        }
        Command::Edit { row, name } => {
            let Some(artist_id) = controller.view().rows.get(row - 1).map(|a| a.id_artist) else {
                eprintln!("no row {row} on this page");
                return;
            };
            controller.edit_row(artist_id);
            if let Some(dialog) = controller.edit_dialog() {
                tokio::spawn(async move {
                    let _ = dialog.submit(ArtistDraft::new(name)).await;
                });
            }
            controller.close_edit_dialog();
        }
        Command::Open(row) => match controller.view().rows.get(row - 1) {
            Some(artist) => println!("{}", controller.detail_route(artist)),
            None => eprintln!("no row {row} on this page"),
        },
        Command::Show => render::table(&controller.view()),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn report_busy(accepted: bool) {
    if !accepted {
        println!("a fetch is in progress, try again when it finishes");
    }
}
