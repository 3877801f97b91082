use intersection_sim::console::{parse_console_line, ConsoleAction, HELP};
use intersection_sim::control_system::SimulationController;
use intersection_sim::global_variables::TimingConfig;
use intersection_sim::shared_data::IntersectionSnapshot;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

fn print_lights(snapshot: &IntersectionSnapshot) {
    let lights: Vec<String> = snapshot
        .lights
        .iter()
        .map(|light| format!("{}={:?}", light.direction, light.color))
        .collect();
    println!("[{} ms] {}", snapshot.elapsed_ms, lights.join(" "));
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let (controller, task) = SimulationController::spawn(TimingConfig::default());

    // Print every light change as it happens.
    let mut transitions = controller.subscribe_transitions();
    let printer_handle = controller.clone();
    let printer = tokio::spawn(async move {
        loop {
            match transitions.recv().await {
                Ok(_) => print_lights(&printer_handle.latest()),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Display lagged, skipped {} transitions", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("Four-way intersection simulator");
    println!("{}", HELP);
    println!("\n> {}", controller.latest().control_label());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        };
        let action = match parse_console_line(&line) {
            Ok(action) => action,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        let result = match action {
            ConsoleAction::Send(command) => controller.send(command).await.map(|snapshot| {
                print_lights(&snapshot);
                println!("> {}", snapshot.control_label());
            }),
            ConsoleAction::Status => controller.snapshot().await.map(|snapshot| {
                match snapshot.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error encoding status: {}", e),
                }
            }),
            ConsoleAction::Help => {
                println!("{}", HELP);
                Ok(())
            }
            ConsoleAction::Quit => break,
            ConsoleAction::Nothing => Ok(()),
        };
        if let Err(e) = result {
            eprintln!("Controller error: {}", e);
            break;
        }
    }

    if let Err(e) = controller.shutdown().await {
        log::warn!("Shutdown failed: {}", e);
    }
    let _ = task.await;
    printer.abort();
    println!("Exiting simulator.");
}
