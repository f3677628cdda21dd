mod paths;
mod run;

fn main() {
    run::initialise_tracing();
    if let Err(err) = run::run() {
        tracing::error!("{err:#}");
        std::process::exit(-1);
    }
}
