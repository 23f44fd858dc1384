//! Dump raw touch events for debugging.
//! Run: epd-touch dump  to stream and print events from the touch node.

use std::io::{self, Write};

use evdevil::event::InputEvent;
use evdevil::Evdev;

use crate::touch::code_name;

pub fn run_dump_touch(device: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let evdev = Evdev::open(device)?;
    eprintln!(
        "Dumping touch events from {} ({}), Ctrl+C to stop:\n",
        device,
        evdev.name()?
    );
    dump_events(evdev.raw_events(), &mut io::stdout().lock())
}

fn dump_events(
    events: impl IntoIterator<Item = io::Result<InputEvent>>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    for (n, ev) in events.into_iter().enumerate() {
        let ev = ev?;
        writeln!(out, "{:6}  {}  value={}", n + 1, code_name(&ev), ev.raw_value())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use evdevil::event::{Abs, AbsEvent, Syn, SynEvent};

    use super::*;

    #[test]
    fn prints_one_line_per_event() {
        let events: Vec<io::Result<InputEvent>> = vec![
            Ok(AbsEvent::new(Abs::MT_POSITION_X, 61).into()),
            Ok(SynEvent::new(Syn::REPORT).into()),
        ];
        let mut out = Vec::new();

        dump_events(events, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ABS_MT_POSITION_X(53)  value=61"));
        assert!(lines[1].contains("SYN_REPORT"));
    }

    #[test]
    fn read_error_ends_the_dump() {
        let events: Vec<io::Result<InputEvent>> = vec![
            Ok(SynEvent::new(Syn::REPORT).into()),
            Err(io::Error::from_raw_os_error(19)),
        ];
        let mut out = Vec::new();

        assert!(dump_events(events, &mut out).is_err());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
