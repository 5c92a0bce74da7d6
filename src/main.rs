//! TimePunch main entrypoint.

use timepunch::run;
use timepunch::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
