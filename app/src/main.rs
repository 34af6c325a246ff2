use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio::task::LocalSet;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use todo_app::command::{self, Command, HELP};
use todo_app::{Config, UreqTransport};
use todo_core::{render, TodoView};

type View = TodoView<UreqTransport>;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(config.log_filter()))
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    LocalSet::new().block_on(&runtime, run(config));
    Ok(())
}

async fn run(config: Config) {
    let client = config.client();
    info!(base_url = client.base_url(), "starting todo view");
    let view = Rc::new(TodoView::new(client, UreqTransport::new()));
    view.subscribe(|state| print!("{}", render(state)));
    print!("{}", view.screen());

    let loader = Rc::clone(&view);
    tokio::task::spawn_local(async move { loader.load_all().await });

    let (tx, mut rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_lines(tx));

    while let Some(line) = rx.recv().await {
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => dispatch(&view, cmd),
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn dispatch(view: &Rc<View>, command: Command) {
    if view.state().loading && !matches!(command, Command::Show | Command::Help) {
        eprintln!("still loading");
        return;
    }

    match command {
        Command::Title(title) => view.set_title(title),
        Command::Description(description) => view.set_description(description),
        Command::Add(title) => {
            if let Some(title) = title {
                view.set_title(title);
            }
            let view = Rc::clone(view);
            tokio::task::spawn_local(async move { view.submit().await });
        }
        Command::Toggle(n) => match resolve(view, n) {
            Some(todo) => {
                let view = Rc::clone(view);
                tokio::task::spawn_local(async move { view.toggle(&todo).await });
            }
            None => eprintln!("no item {n}"),
        },
        Command::Remove(n) => match resolve(view, n) {
            Some(todo) => {
                let view = Rc::clone(view);
                tokio::task::spawn_local(async move { view.remove(todo.id).await });
            }
            None => eprintln!("no item {n}"),
        },
        Command::Show => print!("{}", view.screen()),
        Command::Help => print!("{HELP}"),
        Command::Quit => {}
    }
}

fn resolve(view: &View, n: usize) -> Option<todo_core::Todo> {
    let state = view.state();
    command::resolve(&state, n)
}

/// Runs on its own thread; dropping `tx` on EOF ends the command loop.
fn read_lines(tx: mpsc::UnboundedSender<String>) {
    let mut editor = match rustyline::DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            error!(error = %e, "cannot start line editor");
            return;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    debug!(error = %e, "history entry not recorded");
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                error!(error = %e, "read failed");
                break;
            }
        }
    }
}
