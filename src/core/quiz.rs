//! Multiple-choice quizzes.
//!
//! A quiz is a fixed pool of questions plus a small state value. Every
//! transition takes the current state and returns the next one, so the
//! state can be driven from a terminal loop or from tests alike.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn new(text: &str, options: &[&str], correct: usize, explanation: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
            explanation: explanation.map(str::to_string),
        }
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }
}

/// A term with its definition, the raw material of a vocabulary quiz.
pub trait TermDefinition {
    fn term(&self) -> &str;

    fn definition(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    Answered { selected: usize, correct: bool },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizState {
    pub index: usize,
    pub score: usize,
    pub phase: Phase,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::start()
    }
}

impl QuizState {
    pub fn start() -> Self {
        Self {
            index: 0,
            score: 0,
            phase: Phase::AwaitingAnswer,
        }
    }

    /// Records an answer for the current question. Ignored unless the quiz is
    /// waiting for an answer and `choice` names one of the options.
    pub fn select(self, quiz: &Quiz, choice: usize) -> Self {
        if self.phase != Phase::AwaitingAnswer {
            return self;
        }
        let Some(question) = quiz.question(self.index) else {
            return self;
        };
        if choice >= question.options.len() {
            return self;
        }

        let correct = choice == question.correct;
        Self {
            score: self.score + usize::from(correct),
            phase: Phase::Answered {
                selected: choice,
                correct,
            },
            ..self
        }
    }

    /// Moves past an answered question, finishing after the last one.
    pub fn next(self, quiz: &Quiz) -> Self {
        if !matches!(self.phase, Phase::Answered { .. }) {
            return self;
        }
        let index = self.index + 1;
        if index >= quiz.len() {
            Self {
                phase: Phase::Complete,
                ..self
            }
        } else {
            Self {
                index,
                phase: Phase::AwaitingAnswer,
                ..self
            }
        }
    }

    pub fn restart(self) -> Self {
        Self::start()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_last_question(&self, quiz: &Quiz) -> bool {
        self.index + 1 >= quiz.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    NeedsReview,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Grade::Excellent,
            60.. => Grade::Good,
            _ => Grade::NeedsReview,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent! Your finance knowledge is solid.",
            Grade::Good => "Well done! Keep studying a little more.",
            Grade::NeedsReview => "Let's review the basics. It will click!",
        }
    }
}

/// Final score summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub title: String,
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(title: &str, questions: Vec<QuizQuestion>) -> Self {
        Self {
            title: title.to_string(),
            questions,
        }
    }

    pub fn question(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn result(&self, state: &QuizState) -> QuizResult {
        let total = self.len();
        let percentage = if total == 0 {
            0
        } else {
            (state.score as f64 / total as f64 * 100.0).round() as u32
        };
        QuizResult {
            score: state.score,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }

    /// Basic finance questions.
    pub fn finance() -> Self {
        Self::new(
            "Finance quiz",
            vec![
                QuizQuestion::new(
                    "What is Japan's consumption tax rate?",
                    &["8%", "10%", "12%", "15%"],
                    1,
                    Some("The standard rate is 10%. Items under the reduced rate are taxed at 8%."),
                ),
                QuizQuestion::new(
                    "Which taxation scheme does income tax use?",
                    &["Flat rate", "Progressive rate", "Fixed amount", "Regressive rate"],
                    1,
                    Some("Income tax is progressive: the higher the income, the higher the rate."),
                ),
                QuizQuestion::new(
                    "At 1 USD = 150 JPY, how many yen is 100 USD?",
                    &["1,500 JPY", "15,000 JPY", "150 JPY", "1,50 JPY"],
                    1,
                    Some("100 USD x 150 JPY/USD = 15,000 JPY."),
                ),
                QuizQuestion::new(
                    "Which of these is NOT a main role of a central bank?",
                    &[
                        "Issuing currency",
                        "Interest rate policy",
                        "Collecting taxes",
                        "Price stability",
                    ],
                    2,
                    Some("Collecting taxes is the government's job, not the central bank's."),
                ),
                QuizQuestion::new(
                    "What is inflation?",
                    &[
                        "Prices falling",
                        "Prices rising",
                        "Interest rates rising",
                        "Exchange rates moving",
                    ],
                    1,
                    Some("Inflation is a sustained rise in the general price level."),
                ),
            ],
        )
    }

    /// Crypto basics.
    pub fn crypto() -> Self {
        Self::new(
            "Crypto quiz",
            vec![
                QuizQuestion::new(
                    "Who is credited with inventing Bitcoin?",
                    &["Satoshi Nakamoto", "Vitalik Buterin", "Charlie Lee", "Ryan X. Charles"],
                    0,
                    None,
                ),
                QuizQuestion::new(
                    "What is the most important property of a blockchain?",
                    &["Fast processing", "Decentralized management", "Low cost", "Anonymity"],
                    1,
                    None,
                ),
                QuizQuestion::new(
                    "What is Ethereum best known for?",
                    &["Privacy", "Smart contracts", "Fast payments", "Energy saving"],
                    1,
                    None,
                ),
                QuizQuestion::new(
                    "What does DeFi stand for?",
                    &[
                        "Digital Finance",
                        "Decentralized Finance",
                        "Distributed Finance",
                        "Direct Finance",
                    ],
                    1,
                    None,
                ),
                QuizQuestion::new(
                    "What is the full name of NFT?",
                    &[
                        "New Financial Token",
                        "Non-Fungible Token",
                        "Network Function Token",
                        "Next Generation Token",
                    ],
                    1,
                    None,
                ),
            ],
        )
    }

    /// Builds up to `count` questions from a term list: the definition is
    /// the prompt, and the options are the right term plus two other terms.
    pub fn from_terms<T: TermDefinition, R: Rng + ?Sized>(
        entries: &[T],
        count: usize,
        rng: &mut R,
    ) -> Self {
        let picked: Vec<&T> = entries.choose_multiple(rng, count).collect();
        let questions = picked
            .into_iter()
            .map(|entry| {
                let others: Vec<&str> = entries
                    .iter()
                    .filter(|e| e.term() != entry.term())
                    .map(|e| e.term())
                    .collect();
                let mut options: Vec<String> = others
                    .choose_multiple(rng, 2)
                    .map(|term| term.to_string())
                    .collect();
                options.push(entry.term().to_string());
                options.shuffle(rng);
                let correct = options
                    .iter()
                    .position(|o| o == entry.term())
                    .unwrap_or_default();
                QuizQuestion {
                    text: entry.definition().to_string(),
                    options,
                    correct,
                    explanation: None,
                }
            })
            .collect();
        Self::new("Glossary quiz", questions)
    }
}
