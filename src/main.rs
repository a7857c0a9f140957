use std::env;
use std::error::Error;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

use forkify::commands::{parse_command, Command, HELP};
use forkify::view::paginate;
use forkify::{
    BrowserConfig, Completion, Controller, Event, FileStorage, ForkifyApi, MemoryStorage,
    RecipeApi, Storage, Task, TerminalView, View,
};
use log::{debug, error};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

const USAGE: &str = "\
Usage:
  forkify [--ephemeral] [#<recipe-id>]   interactive browser
  forkify search <query>                  print search results
  forkify recipe <id>                     print one recipe";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("search") => {
            let query = args[1..].join(" ");
            if query.trim().is_empty() {
                return Err(USAGE.into());
            }
            let results = forkify::search_recipes(&query).await?;
            let mut view = TerminalView::new(io::stdout());
            view.render_results(&paginate(&results, 1, results.len()));
            Ok(())
        }
        Some("recipe") => {
            let id = args.get(1).ok_or(USAGE)?;
            let recipe = forkify::fetch_recipe(id).await?;
            TerminalView::new(io::stdout()).render_recipe(&recipe, false);
            Ok(())
        }
        Some("--help") | Some("-h") => {
            println!("{USAGE}");
            Ok(())
        }
        _ => run_interactive(&args).await,
    }
}

async fn run_interactive(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = BrowserConfig::load()?;
    debug!("{:#?}", config);

    let storage: Rc<dyn Storage> = if args.iter().any(|arg| arg == "--ephemeral") {
        Rc::new(MemoryStorage::new())
    } else {
        Rc::new(FileStorage::new(config.storage_dir()))
    };
    let location = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .cloned()
        .unwrap_or_default();

    let api = Arc::new(ForkifyApi::from_config(&config.api)?);
    let mut controller = Controller::new(api, TerminalView::new(io::stdout()), storage)
        .with_results_per_page(config.results_per_page);
    let mut pending = JoinSet::new();

    println!("{HELP}");
    let task = controller.dispatch(Event::Load { location })?;
    spawn_task(&mut pending, &controller, task);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Event(event)) => match controller.dispatch(event) {
                        Ok(task) => spawn_task(&mut pending, &controller, task),
                        Err(err) => controller.view_mut().alert(&err.to_string()),
                    },
                    Err(err) => controller.view_mut().alert(&err.to_string()),
                }
            }
            Some(done) = pending.join_next(), if !pending.is_empty() => {
                match done {
                    Ok(completion) => controller.complete(completion),
                    Err(err) => error!("fetch task failed: {}", err),
                }
            }
        }
    }

    Ok(())
}

/// Run a fetch in the background; its completion comes back through the event loop.
fn spawn_task<A, V>(
    pending: &mut JoinSet<Completion>,
    controller: &Controller<A, V>,
    task: Option<Task>,
) where
    A: RecipeApi + 'static,
    V: View,
{
    if let Some(task) = task {
        let api = controller.api();
        pending.spawn(async move { task.run(api.as_ref()).await });
    }
}
