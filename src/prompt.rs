//! Interactive league questions
//!
//! Each answer parser is pure; `ask_league` loops over any reader/writer
//! pair until every question has a valid answer.

use crate::config::{LeagueFormat, TepTier};
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// What the user told us about their league
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueAnswers {
    pub redraft: bool,
    pub format: LeagueFormat,
    pub tep: TepTier,
    pub upload: bool,
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_format(input: &str) -> Option<LeagueFormat> {
    input.parse().ok()
}

pub fn parse_tep(input: &str) -> Option<TepTier> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| TepTier::try_from(n).ok())
}

/// Ask until `parse` accepts a line
fn ask<R, W, T>(
    input: &mut R,
    out: &mut W,
    question: &str,
    invalid: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{}", question)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("Input closed before a valid answer was given");
        }
        match parse(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(out, "{}", invalid)?,
        }
    }
}

/// Run the league questionnaire. The TEP question is skipped for redraft
/// leagues and the upload question is skipped when no bucket is set.
pub fn ask_league<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    has_bucket: bool,
) -> Result<LeagueAnswers> {
    let redraft = ask(
        input,
        out,
        "Is your league a redraft league? Please enter 'True' or 'False': ",
        "Invalid input. Please enter 'True' or 'False'.",
        parse_yes_no,
    )?;

    let format = ask(
        input,
        out,
        "What is your league format? Please enter '1QB' or 'SF': ",
        "Invalid input. Please enter '1QB' or 'SF'.",
        parse_format,
    )?;

    let tep = if redraft {
        TepTier::None
    } else {
        ask(
            input,
            out,
            "Is there a Tight End Premium (TEP)? Please enter '0' for None, '1' for TE+, '2' for TE++, or '3' for TE+++: ",
            "Invalid input. Please enter 0, 1, 2, or 3.",
            parse_tep,
        )?
    };

    let upload = if has_bucket {
        ask(
            input,
            out,
            "Upload the export to remote storage? Please enter 'Yes' or 'No': ",
            "Invalid input. Please enter 'Yes' or 'No'.",
            parse_yes_no,
        )?
    } else {
        false
    };

    Ok(LeagueAnswers {
        redraft,
        format,
        tep,
        upload,
    })
}
