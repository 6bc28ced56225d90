use dotenv::dotenv;
use kawaii_quiz::quiz::OptionState;
use kawaii_quiz::session::QuestionView;
use kawaii_quiz::{Config, Page, QuestionBank, SessionController, SessionObserver, Snapshot};
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Instant, MissedTickBehavior};

type ShellResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const GREETING_TEXT: &str =
    "Hi! Ready to find out how well you know yourself? Press Enter to start (q to quit).";

/// Prints the quiz to the terminal.
struct Terminal;

impl SessionObserver for Terminal {
    fn on_start(&mut self) {
        println!("\nLet's go! Answer with the option number.");
    }

    fn on_complete(&mut self, score: u32, total: u32) {
        println!("\nQuiz finished! You answered {} of {} questions correctly", score, total);
    }

    fn on_restart(&mut self) {
        println!("\nAgain from the top!");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ShellResult {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting kawaii quiz...");

    let config = Config::from_env()?;
    let bank = QuestionBank::embedded()?;
    let tick = config.tick;
    let mut controller = SessionController::new(config, bank, Terminal);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut shown: Option<Snapshot> = None;

    render(&controller, &mut shown);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                controller.advance(now - last);
                last = now;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_input(&mut controller, line.trim()) {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
        render(&controller, &mut shown);
    }

    log::info!("Bye!");
    Ok(())
}

/// Returns false when the player wants to leave.
fn handle_input(controller: &mut SessionController<Terminal>, input: &str) -> bool {
    if input.eq_ignore_ascii_case("q") {
        return false;
    }

    match controller.page() {
        Page::Intro => {
            controller.start_quiz();
        }
        Page::Quiz => match input.parse::<usize>() {
            Ok(number) if number > 0 => {
                if controller.submit_answer(number - 1).is_none() {
                    debug!("Answer {} was not accepted right now", number);
                }
            }
            _ => {
                warn!("Not an option number: {:?}", input);
                println!("Please enter an option number");
            }
        },
        Page::Result => {
            controller.restart();
        }
    }
    true
}

fn render(controller: &SessionController<Terminal>, shown: &mut Option<Snapshot>) {
    let snapshot = controller.snapshot();
    if shown.as_ref() == Some(&snapshot) {
        return;
    }

    match &snapshot {
        Snapshot::Intro => println!("\n{}", GREETING_TEXT),
        Snapshot::Question(view) => render_question(view),
        Snapshot::LastChance { mascot_asset } => {
            println!("\n[{}]", mascot_asset);
            println!("!!! Last chance! Be careful! !!!");
        }
        Snapshot::Result(result) => {
            println!("\n[{}]", result.mascot_asset());
            println!("{}% correct!", result.percentage);
            println!("{}", result.headline);
            println!("{}", result.message);
            println!(
                "({} confetti pieces, {} particles in all) Press Enter to play again!",
                controller.effects().confetti.len(),
                controller.effects().particle_count()
            );
        }
    }
    *shown = Some(snapshot);
}

fn render_question(view: &QuestionView) {
    println!("\n[{}]", view.mascot_asset);
    println!(
        "Question {}/{}   {}",
        view.number,
        view.total,
        "♥".repeat(view.lives as usize)
    );
    println!("{}", view.prompt);
    for (i, (text, state)) in view.options.iter().enumerate() {
        let marker = match state {
            OptionState::Idle => " ",
            OptionState::Success => "✔",
            OptionState::Failure => "✘",
            OptionState::Neutral => "·",
        };
        println!("  {} {}. {}", marker, i + 1, text);
    }
}
