use super::ui::{self, StyleType};
use crate::core::crypto_terms;
use crate::core::quiz::{Phase, Quiz, QuizResult, QuizState};
use anyhow::Result;
use std::io::BufRead;
use tracing::debug;

/// Questions drawn for a glossary quiz.
pub const GLOSSARY_QUIZ_LENGTH: usize = 10;

fn print_question(quiz: &Quiz, state: &QuizState) {
    let Some(question) = quiz.question(state.index) else {
        return;
    };
    println!(
        "\n{} {}",
        ui::style_text(
            &format!("Q{}/{}", state.index + 1, quiz.len()),
            StyleType::Accent,
        ),
        question.text
    );
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
}

fn print_feedback(quiz: &Quiz, state: &QuizState) {
    let (Phase::Answered { correct, .. }, Some(question)) =
        (state.phase, quiz.question(state.index))
    else {
        return;
    };
    if correct {
        println!("{}", ui::style_text("✓ Correct!", StyleType::Success));
    } else {
        println!(
            "{}",
            ui::style_text(
                &format!("✗ Wrong. The answer is: {}", question.correct_option()),
                StyleType::Error,
            )
        );
    }
    if let Some(explanation) = &question.explanation {
        println!("{}", ui::style_text(explanation, StyleType::Subtle));
    }
}

fn print_result(result: &QuizResult) {
    println!("\n{}", ui::style_text("Result", StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} / {} correct ({}%)",
                result.score, result.total, result.percentage
            ),
            StyleType::TotalValue,
        )
    );
    println!("{}", result.grade.message());
}

/// Runs the quiz against `input` until it is finished and not restarted.
/// Returns the last completed result, or `None` if the user quit early or
/// input ran out first.
pub fn play(quiz: &Quiz, input: &mut dyn BufRead) -> Option<QuizResult> {
    if quiz.is_empty() {
        println!("This quiz has no questions.");
        return None;
    }

    println!("\n{}", ui::style_text(&quiz.title, StyleType::Title));
    let mut state = QuizState::start();
    loop {
        match state.phase {
            Phase::AwaitingAnswer => {
                print_question(quiz, &state);
                let line = ui::read_line(input)?;
                let line = line.trim();
                if line.eq_ignore_ascii_case("q") {
                    return None;
                }
                let next = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .map(|choice| state.select(quiz, choice));
                match next {
                    Some(next) if next != state => state = next,
                    _ => println!(
                        "{}",
                        ui::style_text(
                            "Please enter one of the option numbers.",
                            StyleType::Warning,
                        )
                    ),
                }
            }
            Phase::Answered { .. } => {
                print_feedback(quiz, &state);
                let prompt = if state.is_last_question(quiz) {
                    "Press Enter to see your result"
                } else {
                    "Press Enter for the next question"
                };
                println!("{}", ui::style_text(prompt, StyleType::Subtle));
                ui::read_line(input)?;
                state = state.next(quiz);
            }
            Phase::Complete => {
                let result = quiz.result(&state);
                debug!(?result, "Quiz complete");
                print_result(&result);
                println!("Play again? [y/N]");
                match ui::read_line(input) {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        state = state.restart();
                    }
                    _ => return Some(result),
                }
            }
        }
    }
}

/// Builds the requested quiz. `kind` is `finance`, `crypto` or `glossary`.
pub fn build_quiz(kind: &str) -> Option<Quiz> {
    match kind.trim().to_lowercase().as_str() {
        "finance" => Some(Quiz::finance()),
        "crypto" => Some(Quiz::crypto()),
        "glossary" => Some(Quiz::from_terms(
            &crypto_terms::display_terms(),
            GLOSSARY_QUIZ_LENGTH,
            &mut rand::rng(),
        )),
        _ => None,
    }
}

pub fn run(kind: &str) -> Result<()> {
    let Some(quiz) = build_quiz(kind) else {
        ui::print_error(&format!(
            "Unknown quiz: {kind} (choose finance, crypto or glossary)"
        ));
        return Ok(());
    };
    let stdin = std::io::stdin();
    play(&quiz, &mut stdin.lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quiz::Grade;
    use std::io::Cursor;

    #[test]
    fn test_play_through_finance_quiz() {
        // Answer, then Enter, for each question; one wrong answer; no replay
        let script = "2\n\n2\n\n2\n\n1\n\n2\n\nn\n";
        let result = play(&Quiz::finance(), &mut Cursor::new(script)).unwrap();
        assert_eq!(result.score, 4);
        assert_eq!(result.total, 5);
        assert_eq!(result.grade, Grade::Excellent);
    }

    #[test]
    fn test_invalid_input_is_reprompted() {
        let script = "zero\n9\n0\n2\n\n2\n\n2\n\n3\n\n2\n\n";
        let result = play(&Quiz::finance(), &mut Cursor::new(script)).unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_replay_resets_score() {
        let all_wrong = "1\n\n1\n\n1\n\n1\n\n1\n\n";
        let all_right = "2\n\n2\n\n2\n\n3\n\n2\n\n";
        let script = format!("{all_right}y\n{all_wrong}n\n");
        let result = play(&Quiz::finance(), &mut Cursor::new(script)).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.grade, Grade::NeedsReview);
    }

    #[test]
    fn test_quit_and_eof() {
        assert!(play(&Quiz::crypto(), &mut Cursor::new("q\n")).is_none());
        assert!(play(&Quiz::crypto(), &mut Cursor::new("1\n")).is_none());
    }

    #[test]
    fn test_build_quiz() {
        assert_eq!(build_quiz("Finance").unwrap().len(), 5);
        assert_eq!(build_quiz("glossary").unwrap().len(), GLOSSARY_QUIZ_LENGTH);
        assert!(build_quiz("history").is_none());
    }
}
