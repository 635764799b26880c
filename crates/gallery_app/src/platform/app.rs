use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::{mpsc, Arc};
use std::thread;

use gallery_core::{EffectSink, Msg, SearchController};
use gallery_engine::EngineHandle;
use gallery_logging::{gallery_info, gallery_warn};

use super::config::AppConfig;
use super::effects::{EffectRunner, MsgForwarder};
use super::input::{parse_command, Command, HELP};
use super::ui;

/// Everything the main loop reacts to.
pub enum AppEvent {
    Command(Command),
    Engine(Msg),
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    gallery_logging::initialize(&config.log_settings()?);
    gallery_info!("Starting gallery against {}", config.catalog.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let engine = EngineHandle::new(
        config.catalog_settings(),
        Arc::new(MsgForwarder::new(event_tx.clone())),
    )?;

    let mut controller = SearchController::new(config.search_policy(), EffectRunner::new(engine));
    controller.subscribe(|view| print_lines(&ui::render::render_search(view)));
    let iiif_base = config.catalog.iiif_base.clone();
    controller.subscribe_detail(move |view| {
        print_lines(&ui::render::render_detail(view, &iiif_base));
    });

    spawn_stdin_reader(event_tx)?;
    print_lines(&[HELP.to_string()]);

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Engine(msg) => controller.dispatch(msg),
            AppEvent::Command(command) => {
                if handle_command(&mut controller, command).is_break() {
                    break;
                }
            }
        }
    }

    gallery_info!("Shutting down");
    Ok(())
}

fn handle_command<S: EffectSink>(
    controller: &mut SearchController<S>,
    command: Command,
) -> ControlFlow<()> {
    match command {
        Command::Type(text) => controller.on_input(text),
        Command::Search(query) => controller.start_search(query),
        Command::More => {
            if controller.state().view().reached_end() {
                print_lines(&["(no more pages)".to_string()]);
            } else {
                controller.load_next_page();
            }
        }
        Command::Retry => controller.retry(),
        Command::Clear => controller.clear(),
        Command::Show(id) => controller.request_artwork(id),
        Command::Back => controller.clear_artwork(),
        Command::Reload => controller.retry_artwork(),
        Command::Help => print_lines(&[HELP.to_string()]),
        Command::Quit => return ControlFlow::Break(()),
        Command::Unknown(line) => {
            print_lines(&[format!("unknown command {line:?}; /help lists commands")]);
        }
    }
    ControlFlow::Continue(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("gallery-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let command = match line {
                    Ok(line) => parse_command(&line),
                    Err(err) => {
                        gallery_warn!("Failed to read stdin: {}", err);
                        break;
                    }
                };
                let quit = command == Command::Quit;
                if tx.send(AppEvent::Command(command)).is_err() || quit {
                    return;
                }
            }
            let _ = tx.send(AppEvent::Command(Command::Quit));
        })?;
    Ok(())
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
