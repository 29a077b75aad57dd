use elevatorscan::{console, init, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Argument på formen "key::value", sjå "cargo r -- help"
    let settings = init::parse_args()?;
    if settings.show_help {
        println!("{}", init::HELP);
        return Ok(());
    }

    let elevator = init::build_elevator(&settings);
    print::info(format!(
        "Car ready at floor {}, serving {}..={}",
        elevator.current_floor().await,
        settings.bounds.min(),
        settings.bounds.max()
    ));

    console::run_console(elevator).await
}
