//! OpenFst AT&T text format.
//!
//! One arc per line, `src dst ilabel olabel weight`, and one line per final
//! state, `state weight`, separated by tabs. The first line belongs to the
//! start state. Labels are single characters except for the reserved names
//! below:
//!
//! | Name        | Meaning     |
//! |-------------|-------------|
//! | `<eps>`     | epsilon     |
//! | `<space>`   | `' '`       |
//! | `<tab>`     | `'\t'`      |
//! | `<newline>` | `'\n'`      |
//! | `<lt>`      | `'<'`       |
//!
//! Archives list their rules one after another, each introduced by a
//! `[RULE_NAME]` line.

use crate::fst::{Arc, Fst, Label, State, StateId, Weight};
use std::borrow::Cow;
use std::io::{BufRead, BufReader, Read, Write};

use super::{FstSerializer, GrammarArchive, SerializationError};

/// AT&T text serializer.
///
/// Literal labels are expanded into single-symbol arcs on the way out.
pub struct AttSerializer;

impl FstSerializer for AttSerializer {
    fn serialize<W: Write>(fst: &Fst, mut writer: W) -> Result<(), SerializationError> {
        write_fst(fst, &mut writer)?;
        Ok(())
    }

    fn deserialize<R: Read>(reader: R) -> Result<Fst, SerializationError> {
        let mut parser = FstParser::default();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.starts_with('[') {
                return Err(att_error(index + 1, "rule header in a single-automaton file"));
            }
            parser.line(index + 1, &line)?;
        }
        parser.finish()
    }

    fn serialize_archive<W: Write>(
        archive: &GrammarArchive,
        mut writer: W,
    ) -> Result<(), SerializationError> {
        for (name, fst) in archive.rules() {
            writeln!(writer, "[{name}]")?;
            write_fst(fst, &mut writer)?;
        }
        Ok(())
    }

    fn deserialize_archive<R: Read>(reader: R) -> Result<GrammarArchive, SerializationError> {
        let mut archive = GrammarArchive::new();
        let mut current: Option<(String, FstParser)> = None;

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                if let Some((name, parser)) = current.take() {
                    archive.insert(name, parser.finish()?);
                }
                current = Some((name.to_string(), FstParser::default()));
                continue;
            }
            match current.as_mut() {
                Some((_, parser)) => parser.line(number, &line)?,
                None if line.trim().is_empty() => {}
                None => return Err(att_error(number, "arc before the first rule header")),
            }
        }
        if let Some((name, parser)) = current {
            archive.insert(name, parser.finish()?);
        }
        Ok(archive)
    }
}

fn write_fst<W: Write>(fst: &Fst, writer: &mut W) -> std::io::Result<()> {
    let fst = fst.expand_literals();
    let start = fst.start();
    if fst.arcs(start).is_empty() && fst.final_weight(start).is_none() {
        return Ok(());
    }

    let order = std::iter::once(start).chain((0..fst.num_states()).filter(|&s| s != start));
    for state in order {
        for arc in fst.arcs(state) {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}",
                state,
                arc.nextstate,
                label_name(&arc.ilabel),
                label_name(&arc.olabel),
                arc.weight.value()
            )?;
        }
        if let Some(weight) = fst.final_weight(state) {
            writeln!(writer, "{}\t{}", state, weight.value())?;
        }
    }
    Ok(())
}

fn label_name(label: &Label) -> Cow<'_, str> {
    match label {
        Label::Epsilon => Cow::Borrowed("<eps>"),
        Label::Symbol(' ') => Cow::Borrowed("<space>"),
        Label::Symbol('\t') => Cow::Borrowed("<tab>"),
        Label::Symbol('\n') => Cow::Borrowed("<newline>"),
        Label::Symbol('<') => Cow::Borrowed("<lt>"),
        Label::Symbol(c) => Cow::Owned(c.to_string()),
        Label::Literal(text) => Cow::Borrowed(text),
    }
}

fn parse_label(line: usize, name: &str) -> Result<Label, SerializationError> {
    match name {
        "<eps>" => return Ok(Label::Epsilon),
        "<space>" => return Ok(Label::Symbol(' ')),
        "<tab>" => return Ok(Label::Symbol('\t')),
        "<newline>" => return Ok(Label::Symbol('\n')),
        "<lt>" => return Ok(Label::Symbol('<')),
        _ => {}
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Label::Symbol(c)),
        _ => Err(att_error(line, &format!("unknown label '{name}'"))),
    }
}

fn att_error(line: usize, reason: &str) -> SerializationError {
    SerializationError::Att {
        line,
        reason: reason.to_string(),
    }
}

/// Accumulates the lines of one automaton.
///
/// States are allocated once every line is read, so a corrupt id is
/// rejected before anything is sized by it.
#[derive(Default)]
struct FstParser {
    arcs: Vec<(StateId, Arc)>,
    finals: Vec<(StateId, Weight)>,
    start: Option<StateId>,
    lines: usize,
    /// Highest state id and the line it appeared on
    highest: Option<(StateId, usize)>,
}

impl FstParser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), SerializationError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        self.lines += 1;
        let fields: Vec<&str> = line.split('\t').collect();
        let state = self.state(number, fields[0])?;
        self.start.get_or_insert(state);

        match fields.len() {
            1 | 2 => {
                let weight = parse_weight(number, fields.get(1).copied())?;
                self.finals.push((state, weight));
            }
            4 | 5 => {
                let nextstate = self.state(number, fields[1])?;
                let ilabel = parse_label(number, fields[2])?;
                let olabel = parse_label(number, fields[3])?;
                let weight = parse_weight(number, fields.get(4).copied())?;
                self.arcs
                    .push((state, Arc::new(ilabel, olabel, weight, nextstate)));
            }
            n => return Err(att_error(number, &format!("expected 1, 2, 4 or 5 fields, found {n}"))),
        }
        Ok(())
    }

    fn state(&mut self, number: usize, field: &str) -> Result<StateId, SerializationError> {
        let id: StateId = field
            .trim()
            .parse()
            .map_err(|_| att_error(number, &format!("invalid state '{field}'")))?;
        if self.highest.map_or(true, |(highest, _)| id > highest) {
            self.highest = Some((id, number));
        }
        Ok(id)
    }

    fn finish(self) -> Result<Fst, SerializationError> {
        let (Some(start), Some((highest, number))) = (self.start, self.highest) else {
            return Ok(Fst::empty());
        };
        // Every state but the start is entered by at least one arc line.
        let limit = self.lines.saturating_mul(2);
        if highest > limit {
            return Err(att_error(
                number,
                &format!("state {highest} out of range for {} lines", self.lines),
            ));
        }

        let mut states = vec![State::default(); highest + 1];
        for (state, arc) in self.arcs {
            states[state].arcs.push(arc);
        }
        for (state, weight) in self.finals {
            states[state].final_weight = Some(weight);
        }
        Ok(Fst::from_parts(states, start)?)
    }
}

fn parse_weight(line: usize, field: Option<&str>) -> Result<Weight, SerializationError> {
    let Some(field) = field else {
        return Ok(Weight::ONE);
    };
    field
        .trim()
        .parse::<f32>()
        .ok()
        .and_then(Weight::new)
        .ok_or_else(|| att_error(line, &format!("invalid weight '{field}'")))
}
