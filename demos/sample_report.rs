//! Print summaries for the built-in sample sessions

use stride_flux::{sample_packages, workout_summary};

fn main() {
    for package in sample_packages() {
        match workout_summary(&package.workout_type, &package.data) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
