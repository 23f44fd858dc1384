use super::PanelProfile;

pub const EPD_2IN13_V3: PanelProfile = PanelProfile {
    name: "Waveshare 2.13inch Touch e-Paper HAT (V3)",

    // 122x250 panel, portrait native
    width: 122,
    height: 250,

    // GT1151 reports panel coordinates directly
    touch_x_max: 121,
    touch_y_max: 249,
    touch_size_max: 255,

    // HAT wiring on the Raspberry Pi header (BCM numbering)
    touch_i2c_address: 0x14,
    gpio_chip: "/dev/gpiochip0",
    int_line: 27,
    trst_line: 22,

    touch_device: "/dev/input/event0",
};
