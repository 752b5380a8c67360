use std::time::Duration;

use dashboard_core::{Archiver, BucketStatus, ReadingSummary, WeatherFetcher};

/// Entering this (in any casing) at the prompt ends the session, which also
/// means a city literally named "Exit" can never be queried. Long-standing
/// quirk, kept as-is.
const EXIT_SENTINEL: &str = "Exit";

/// Run the prompt/fetch/archive loop until the operator enters the exit
/// sentinel or the prompt is interrupted.
///
/// No failure in here is fatal: fetch and storage errors are reported and
/// the loop moves on to the next prompt.
pub async fn run(fetcher: &dyn WeatherFetcher, archiver: &Archiver, pause: Duration) {
    match archiver.ensure_bucket().await {
        Ok(BucketStatus::AlreadyExists) => {
            println!("Bucket {} already exists", archiver.bucket());
        }
        Ok(BucketStatus::Created) => {
            println!("Successfully created bucket {}", archiver.bucket());
        }
        Err(err) => eprintln!("Error preparing bucket: {err}"),
    }

    loop {
        println!("{:-^60}", "Welcome to the Weather Dashboard!");

        let input = match inquire::Text::new("Enter City Name:").prompt() {
            Ok(input) => input,
            Err(_) => break,
        };

        // Title-cased verbatim, surrounding whitespace included, so
        // "  exit  " does not terminate. Matches the original behavior.
        let city = title_case(&input);
        if city == EXIT_SENTINEL {
            break;
        }

        handle_city(fetcher, archiver, &city).await;

        tokio::time::sleep(pause).await;
    }
}

/// One iteration of the dashboard: fetch, render, archive, report. A fetch
/// error is terminal for the iteration and nothing is written.
async fn handle_city(fetcher: &dyn WeatherFetcher, archiver: &Archiver, city: &str) {
    println!("Fetching weather data for {city}...");

    match fetcher.current(city).await {
        Ok(reading) => {
            println!("{:-^50}", format!("The Weather for {city}"));
            match reading.summary() {
                Some(summary) => render(&summary),
                None => println!("Provider response had an unexpected shape"),
            }

            match archiver.archive(&reading, city).await {
                Ok(key) => {
                    println!(
                        "Weather data for {city} saved to {}: {key}",
                        archiver.bucket()
                    );
                }
                Err(err) => eprintln!("Error saving weather data: {err}"),
            }
        }
        Err(err) => eprintln!("Failed to fetch weather data for {city}: {err}"),
    }
}

fn render(summary: &ReadingSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

// Debug float formatting keeps the trailing `.0` on whole-number readings.
fn summary_lines(summary: &ReadingSummary) -> Vec<String> {
    vec![
        format!("Temperature: {:?}°C", summary.temperature_c),
        format!("Feels like: {:?}°C", summary.feels_like_c),
        format!("Humidity: {}%", summary.humidity_pct),
        format!("Conditions: {}", summary.condition),
    ]
}

/// Title-case every alphabetic run, so "nairobi" becomes "Nairobi" and
/// "new york" becomes "New York". Runs are delimited by any non-alphabetic
/// character, which title-cases "o'brien" as "O'Brien" — another kept quirk.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }

    out
}
