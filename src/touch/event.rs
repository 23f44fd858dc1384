//! Names for the event codes a touch node emits.

use evdevil::event::InputEvent;

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;
pub const SYN_REPORT: u16 = 0;
pub const SYN_DROPPED: u16 = 3;

pub const ABS_MT_SLOT: u16 = 0x2f;
pub const ABS_MT_TOUCH_MAJOR: u16 = 0x30;
pub const ABS_MT_POSITION_X: u16 = 0x35;
pub const ABS_MT_POSITION_Y: u16 = 0x36;
pub const ABS_MT_TRACKING_ID: u16 = 0x39;
pub const ABS_MT_PRESSURE: u16 = 0x3a;

/// Human readable name for an event, used by `dump`.
pub fn code_name(ev: &InputEvent) -> String {
    let (ty, code) = (ev.event_type().raw(), ev.raw_code());
    match ty {
        EV_SYN if code == SYN_DROPPED => "SYN_DROPPED".to_string(),
        EV_SYN => "SYN_REPORT".to_string(),
        EV_KEY => format!("KEY/{}", code),
        EV_ABS => {
            let abs = match code {
                0x00 => "X",
                0x01 => "Y",
                0x18 => "PRESSURE",
                ABS_MT_SLOT => "MT_SLOT",
                ABS_MT_TOUCH_MAJOR => "MT_TOUCH_MAJOR",
                0x31 => "MT_TOUCH_MINOR",
                ABS_MT_POSITION_X => "MT_POSITION_X",
                ABS_MT_POSITION_Y => "MT_POSITION_Y",
                0x37 => "MT_TOOL_TYPE",
                ABS_MT_TRACKING_ID => "MT_TRACKING_ID",
                ABS_MT_PRESSURE => "MT_PRESSURE",
                _ => "?",
            };
            format!("ABS_{}({})", abs, code)
        }
        _ => format!("type{} code{}", ty, code),
    }
}

#[cfg(test)]
mod tests {
    use evdevil::event::EventType;

    use super::*;

    #[test]
    fn names_common_codes() {
        let name = |ty, code| code_name(&InputEvent::new(EventType::from_raw(ty), code, 0));
        assert_eq!(name(EV_SYN, SYN_REPORT), "SYN_REPORT");
        assert_eq!(name(EV_SYN, SYN_DROPPED), "SYN_DROPPED");
        assert_eq!(name(EV_ABS, ABS_MT_POSITION_Y), "ABS_MT_POSITION_Y(54)");
        assert_eq!(name(9, 1), "type9 code1");
    }
}
