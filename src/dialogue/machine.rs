//! The conversation state machine.
//!
//! A pure transition function: current session plus one inbound event in,
//! mutated session plus a list of outbound actions out. No I/O happens
//! here; the engine executes the actions afterwards. Validation failures
//! never advance the state, so the user can retry the same prompt
//! indefinitely.

use chrono::NaiveDate;

use super::events::{Action, Button, ButtonToken, Command, InboundEvent, TextOptions};
use super::session::{Awaiting, Session};
use crate::content;
use crate::numerology::{BirthDate, chinese_animal, expression, life_path, zodiac_sign};

const MENU_TEXT: &str = "Hola, ¿qué deseas calcular?";

const HELP_TEXT: &str = "*Bot para Numerología*\n\
    /start - Iniciar el bot\n\
    /help - Mostrar esta ayuda";

const PROMPT_BIRTHDATE: &str =
    "Por favor, escribe tu fecha de nacimiento en el formato DD/MM/AAAA:";

const PROMPT_NAME: &str = "Por favor, escribe tu nombre completo:";

const DATE_FORMAT_ERROR: &str =
    "Por favor, ingresa una fecha válida en el formato DD/MM/AAAA.";

const NAME_FORMAT_ERROR: &str =
    "Por favor, ingresa un nombre válido (solo letras y espacios, mínimo 2 letras).";

const FAREWELL: &str = "Gracias por usar el bot. ¡Hasta luego!";

const IDLE_HINT: &str = "Usa /start para ver el menú.";

/// Applies one inbound event to a session.
///
/// `today` is injected so the day-number flow stays deterministic under
/// test; callers pass the current local date.
#[must_use]
pub fn handle_event(session: &mut Session, event: InboundEvent, today: NaiveDate) -> Vec<Action> {
    match event {
        InboundEvent::Command(Command::Start) => {
            session.reset();
            vec![menu()]
        }
        InboundEvent::Command(Command::Help) => {
            vec![help()]
        }
        InboundEvent::Button(token) => handle_button(session, token, today),
        InboundEvent::Text(body) => handle_text(session, &body),
    }
}

/// Button presses. Menu tokens are honored from any state: a press while a
/// question is outstanding abandons that question and starts the chosen
/// flow fresh, rather than being silently dropped.
fn handle_button(session: &mut Session, token: ButtonToken, today: NaiveDate) -> Vec<Action> {
    match token {
        ButtonToken::Retry => {
            session.reset();
            vec![menu()]
        }
        ButtonToken::Exit => {
            session.reset();
            vec![text(FAREWELL, TextOptions::plain())]
        }
        ButtonToken::ProfileNumber => {
            session.reset();
            session.awaiting = Awaiting::BirthdayForProfile;
            vec![text(PROMPT_BIRTHDATE, TextOptions::plain())]
        }
        ButtonToken::DayNumber => {
            session.reset();
            vec![day_result(today)]
        }
        ButtonToken::ExpressionNumber => {
            session.reset();
            session.awaiting = Awaiting::NameForExpression;
            vec![text(PROMPT_NAME, TextOptions::plain())]
        }
        ButtonToken::FullReport => {
            session.reset();
            session.awaiting = Awaiting::NameForReport;
            vec![text(PROMPT_NAME, TextOptions::plain())]
        }
    }
}

fn handle_text(session: &mut Session, body: &str) -> Vec<Action> {
    match session.awaiting {
        Awaiting::None => vec![text(IDLE_HINT, TextOptions::plain())],

        Awaiting::BirthdayForProfile => match body.parse::<BirthDate>() {
            Ok(date) => {
                session.awaiting = Awaiting::None;
                vec![profile_result(date)]
            }
            Err(_) => vec![text(DATE_FORMAT_ERROR, TextOptions::plain())],
        },

        Awaiting::NameForExpression => {
            session.awaiting = Awaiting::None;
            vec![expression_result(body)]
        }

        Awaiting::NameForReport => {
            let name = body.trim();
            if is_valid_name(name) {
                session.pending_report_name = Some(name.to_owned());
                session.awaiting = Awaiting::BirthdayForReport;
                vec![text(
                    format!("Gracias, {name}. Ahora escribe tu fecha de nacimiento (DD/MM/AAAA):"),
                    TextOptions::plain(),
                )]
            } else {
                vec![text(NAME_FORMAT_ERROR, TextOptions::plain())]
            }
        }

        Awaiting::BirthdayForReport => match body.parse::<BirthDate>() {
            Ok(date) => {
                let name = session.pending_report_name.take().unwrap_or_default();
                session.awaiting = Awaiting::None;
                vec![
                    Action::SendTyping,
                    Action::RenderReport {
                        name,
                        birth_date: date,
                    },
                ]
            }
            Err(_) => vec![text(DATE_FORMAT_ERROR, TextOptions::plain())],
        },
    }
}

/// Name validation for the report flow: letters and spaces only, with at
/// least two letters.
fn is_valid_name(name: &str) -> bool {
    let letters = name.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && name.chars().all(|c| c.is_alphabetic() || c == ' ')
}

fn text(body: impl Into<String>, options: TextOptions) -> Action {
    Action::SendText {
        body: body.into(),
        options,
    }
}

fn menu() -> Action {
    text(
        MENU_TEXT,
        TextOptions::with_buttons(vec![
            vec![
                Button::new("Mi número mágico", ButtonToken::ProfileNumber),
                Button::new("Número del día", ButtonToken::DayNumber),
            ],
            vec![
                Button::new("Número de expresión", ButtonToken::ExpressionNumber),
                Button::new("Informe completo", ButtonToken::FullReport),
            ],
        ]),
    )
}

fn help() -> Action {
    text(HELP_TEXT, TextOptions::markdown())
}

/// Retry/exit keyboard attached to every result message. The engine
/// reuses it for the report follow-up and apology.
pub(crate) fn retry_exit_buttons() -> Vec<Vec<Button>> {
    vec![vec![
        Button::new("Consultar otro", ButtonToken::Retry),
        Button::new("Salir", ButtonToken::Exit),
    ]]
}

fn day_result(today: NaiveDate) -> Action {
    let date = BirthDate::from(today);
    let number = life_path(date);

    text(
        format!(
            "El número mágico del día de hoy ({date}) es: {number}\n{}",
            content::daily_guidance(number)
        ),
        TextOptions::with_buttons(retry_exit_buttons()),
    )
}

fn profile_result(date: BirthDate) -> Action {
    let number = life_path(date);
    let sign = zodiac_sign(date);
    let animal = chinese_animal(date);

    text(
        format!(
            "Gracias, tu número mágico es: {number}\n{}\n\n\
             Tu signo del zodiaco es: {sign}\n{}\n\n\
             En el horóscopo chino eres: {animal}\n{}",
            content::life_path_meaning(number),
            content::zodiac_blurb(sign),
            content::chinese_blurb(animal),
        ),
        TextOptions::with_buttons(retry_exit_buttons()),
    )
}

fn expression_result(name: &str) -> Action {
    let name = name.trim();
    let number = expression(name);

    text(
        format!(
            "El número de expresión de \"{name}\" es: {number}\n{}",
            content::life_path_meaning(number)
        ),
        TextOptions::with_buttons(retry_exit_buttons()),
    )
}
