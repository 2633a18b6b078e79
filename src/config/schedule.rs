/*!
Technique schedules, parsed from strings.

A schedule is a sequence of lines, each of which is a sequence of [techniques](Technique) run in order.
- A character outside of brackets is a line of its own, run once.
- `[...]` groups techniques into a single line, run once.
- `[...]+` groups techniques into a single line, run repeatedly until no technique of the line reports a change.

Groups may not be nested, and characters which do not name a technique are skipped.

```rust
# use otter_simp::config::{schedule::Schedule, Technique};
let schedule: Schedule = "u[psv]+w".parse().unwrap();

assert_eq!(schedule.lines.len(), 2);
assert_eq!(schedule.lines[0].techniques, vec![Technique::Propagation]);
assert!(schedule.lines[1].repeat);
assert_eq!(schedule.to_string(), "u[psv]+");
```
*/

use std::str::FromStr;

use crate::{
    config::Technique,
    types::err::{self},
};

/// A line of a schedule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleLine {
    pub techniques: Vec<Technique>,

    /// Repeat the line until no technique reports a change.
    pub repeat: bool,
}

/// A schedule of techniques.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub lines: Vec<ScheduleLine>,
}

impl FromStr for Schedule {
    type Err = err::ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut schedule = Schedule::default();
        let mut group: Option<ScheduleLine> = None;
        let mut chars = s.chars().enumerate().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '[' => {
                    if group.is_some() {
                        log::error!("Nested group at {position} of schedule {s}");
                        return Err(err::ScheduleError::NestedGroup(position));
                    }
                    group = Some(ScheduleLine::default());
                }

                ']' => {
                    let Some(mut line) = group.take() else {
                        log::error!("Unopened group at {position} of schedule {s}");
                        return Err(err::ScheduleError::UnopenedGroup(position));
                    };
                    if chars.peek().is_some_and(|(_, next)| *next == '+') {
                        chars.next();
                        line.repeat = true;
                    }
                    if !line.techniques.is_empty() {
                        schedule.lines.push(line);
                    }
                }

                _ => {
                    let Some(technique) = Technique::from_char(c) else {
                        continue;
                    };
                    match group.as_mut() {
                        Some(line) => line.techniques.push(technique),
                        None => schedule.lines.push(ScheduleLine {
                            techniques: vec![technique],
                            repeat: false,
                        }),
                    }
                }
            }
        }

        match group {
            Some(_) => Err(err::ScheduleError::UnclosedGroup),
            None => Ok(schedule),
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            let grouped = line.repeat || line.techniques.len() > 1;
            if grouped {
                write!(f, "[")?;
            }
            for technique in &line.techniques {
                write!(f, "{}", technique.as_char())?;
            }
            if grouped {
                write!(f, "]")?;
            }
            if line.repeat {
                write!(f, "+")?;
            }
        }
        Ok(())
    }
}
