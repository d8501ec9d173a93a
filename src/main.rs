//! Binary entry point that glues the JSON-backed record store to the TUI.
//! Bootstrapping order matters: paths first, then the log file they point
//! at, then the document, and finally the Ratatui event loop.
use store_directory_manager::paths::AppPaths;
use store_directory_manager::publish::Publisher;
use store_directory_manager::{logging, run_app, App, RecordStore};

/// Branch the publish step pushes to.
const BRANCH: &str = "main";

/// Resolve the data layout, load the record document, and launch the TUI.
///
/// Returning a `Result` bubbles up fatal initialization problems (a missing
/// home directory, a corrupt document file) to the terminal instead of
/// crashing inside the alternate screen.
fn main() -> anyhow::Result<()> {
    let paths = AppPaths::resolve()?;
    logging::init(&paths.log_file)?;

    let store = RecordStore::load(paths.data_file)?;
    let publisher = Publisher::new(paths.repo_dir, paths.counter_file, BRANCH);

    let mut app = App::new(store, publisher);
    run_app(&mut app)
}
