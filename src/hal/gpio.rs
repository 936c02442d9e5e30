//! GPIO HAL for the edge input and the status LED.
//!
//! The edge interrupt is registered directly with the ESP-IDF GPIO ISR
//! service so it stays armed after every edge.

use core::ffi::c_void;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::sys::{self, esp, EspError};

use crate::capture::EdgeCapture;
use crate::timing::{EdgeDirection, Timestamp};

/// Edge input pin configuration.
#[derive(Debug, Clone, Copy)]
pub struct EdgeInputConfig {
    pub pin: i32,
    pub edge: EdgeDirection,
    /// Enable the internal pull-up (open-collector sensors).
    pub pull_up: bool,
}

impl EdgeInputConfig {
    /// Board default: GPIO4 with pull-up.
    pub const fn new(edge: EdgeDirection) -> Self {
        Self {
            pin: 4,
            edge,
            pull_up: true,
        }
    }
}

/// Status LED pin.
pub const STATUS_LED_PIN: i32 = 48;

/// GPIO ISR handler.
///
/// Timestamp and enqueue only: no logging, no filtering.
unsafe extern "C" fn edge_isr(arg: *mut c_void) {
    // SAFETY: arg is the &'static EdgeCapture registered in `attach_edge_isr`
    let capture = unsafe { &*(arg as *const EdgeCapture<'static>) };
    let now = unsafe { sys::esp_timer_get_time() };
    capture.on_edge(Timestamp::from_micros_i64(now));
}

/// Configure the edge pin and attach the capture ISR.
pub fn attach_edge_isr(
    config: &EdgeInputConfig,
    capture: &'static EdgeCapture<'static>,
) -> Result<(), EspError> {
    let intr_type = match config.edge {
        EdgeDirection::Rising => sys::gpio_int_type_t_GPIO_INTR_POSEDGE,
        EdgeDirection::Falling => sys::gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let pull_up = if config.pull_up {
        sys::gpio_pullup_t_GPIO_PULLUP_ENABLE
    } else {
        sys::gpio_pullup_t_GPIO_PULLUP_DISABLE
    };

    let io_conf = sys::gpio_config_t {
        pin_bit_mask: 1u64 << config.pin,
        mode: sys::gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: pull_up,
        pull_down_en: sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type,
        ..Default::default()
    };

    // SAFETY: plain ESP-IDF driver calls; the handler argument is 'static
    unsafe {
        esp!(sys::gpio_config(&io_conf))?;

        // Already installed by another driver is fine
        let err = sys::gpio_install_isr_service(0);
        if err != sys::ESP_ERR_INVALID_STATE as sys::esp_err_t {
            esp!(err)?;
        }

        esp!(sys::gpio_isr_handler_add(
            config.pin,
            Some(edge_isr),
            capture as *const EdgeCapture<'static> as *mut c_void,
        ))?;
    }

    Ok(())
}

/// Configure the status LED as output, off.
pub fn init_status_led() -> Result<(), EspError> {
    // SAFETY: plain ESP-IDF driver calls
    unsafe {
        esp!(sys::gpio_reset_pin(STATUS_LED_PIN))?;
        esp!(sys::gpio_set_direction(STATUS_LED_PIN, sys::gpio_mode_t_GPIO_MODE_OUTPUT))?;
        esp!(sys::gpio_set_level(STATUS_LED_PIN, 0))
    }
}

/// Drive the status LED.
pub fn set_status_led(on: bool) {
    // SAFETY: pin configured by init_status_led
    unsafe {
        sys::gpio_set_level(STATUS_LED_PIN, on as u32);
    }
}

/// Fatal fault: blink the status LED forever.
pub fn blink_forever(period_ms: u32) -> ! {
    let mut on = false;
    loop {
        on = !on;
        set_status_led(on);
        FreeRtos::delay_ms(period_ms);
    }
}
