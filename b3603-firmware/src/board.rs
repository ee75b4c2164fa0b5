//! Pin map and peripheral setup for the STM32F030C8 replacement controller
//!
//! | Function              | Pin  | Peripheral       |
//! |-----------------------|------|------------------|
//! | Current sense         | PA2  | ADC_IN2          |
//! | Output voltage sense  | PA3  | ADC_IN3          |
//! | Input voltage sense   | PA4  | ADC_IN4          |
//! | Voltage reference     | PA6  | TIM3_CH1         |
//! | Current reference     | PA7  | TIM3_CH2         |
//! | Output enable (low)   | PB0  | GPIO out         |
//! | CC/CV indicator       | PB1  | GPIO tri-state   |
//! | CC sense              | PB2  | GPIO in          |
//! | 595 data              | PB3  | GPIO out         |
//! | 595 clock             | PB4  | GPIO out         |
//! | 595 latch             | PB5  | GPIO out         |
//! | Serial TX / RX        | PA9 / PA10 | USART1     |

use b3603_core::controller::Board;
use b3603_drivers::{FlashConfigStore, ModePin, PwmOutputStage, ShiftRegister, UartLink};
use b3603_hal::{UartConfig, PWM_PERIOD_COUNTS};
use b3603_hal_stm32f0::watchdog::WATCHDOG_TIMEOUT_US;
use b3603_hal_stm32f0::{
    set_period, usart_config, PageFlash, Stm32Adc, Stm32Input, Stm32Output, Stm32Pwm, Stm32TriState,
    Stm32Uart, Stm32Watchdog,
};
use defmt::*;
use embassy_stm32::adc::{self, Adc};
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{Flex, Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::peripherals::{self, TIM3};
use embassy_stm32::time::hz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::{bind_interrupts, Peripherals};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
    ADC1_COMP => adc::InterruptHandler<peripherals::ADC1>;
});

/// Default SYSCLK (HSI, no PLL)
const SYSCLK_HZ: u32 = 8_000_000;

// UART ring buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

pub type Bus = ShiftRegister<Stm32Output<'static>, Stm32Output<'static>, Stm32Output<'static>>;
pub type Sense = ModePin<Stm32Input<'static>>;
pub type Actuator = PwmOutputStage<
    Stm32Pwm<'static, TIM3>,
    Stm32Pwm<'static, TIM3>,
    Stm32Output<'static>,
    Stm32TriState<'static>,
>;
pub type Store = FlashConfigStore<PageFlash<'static>>;
pub type Link = UartLink<Stm32Uart<'static>>;

pub type B3603Board =
    Board<Stm32Adc<'static>, Bus, Sense, Actuator, Store, Link, Stm32Watchdog<'static>>;

/// Configure every peripheral the control loop uses
pub fn init(p: Peripherals) -> B3603Board {
    // Output stage first so the regulator is held off while the rest starts
    let enable = Stm32Output::new(Output::new(p.PB0, Level::High, Speed::Low));
    let indicator = Stm32TriState::new(Flex::new(p.PB1));

    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        Some(PwmPin::new(p.PA7, OutputType::PushPull)),
        None,
        None,
        hz(SYSCLK_HZ / PWM_PERIOD_COUNTS as u32),
        CountingMode::EdgeAlignedUp,
    );
    // Prescaler stays 1 at this rate; pin ARR to the exact period
    set_period(embassy_stm32::pac::TIM3, PWM_PERIOD_COUNTS);
    let channels = pwm.split();
    let actuator = PwmOutputStage::new(
        Stm32Pwm::new(channels.ch1),
        Stm32Pwm::new(channels.ch2),
        enable,
        indicator,
    );
    info!("Output stage initialized (disabled)");

    let adc = Stm32Adc::new(
        Adc::new(p.ADC1, Irqs),
        [Flex::new(p.PA2), Flex::new(p.PA3), Flex::new(p.PA4)],
    );
    info!("ADC initialized");

    let bus = ShiftRegister::new(
        Stm32Output::new(Output::new(p.PB3, Level::Low, Speed::Medium)),
        Stm32Output::new(Output::new(p.PB4, Level::Low, Speed::Medium)),
        Stm32Output::new(Output::new(p.PB5, Level::High, Speed::Medium)),
    );
    let sense = ModePin::new(Stm32Input::new(Input::new(p.PB2, Pull::None)));

    let store = FlashConfigStore::new(PageFlash::new(Flash::new_blocking(p.FLASH)));

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = unwrap!(BufferedUart::new(
        p.USART1,
        p.PA10,
        p.PA9,
        tx_buf,
        rx_buf,
        Irqs,
        usart_config(&UartConfig::default()),
    ));
    let link = UartLink::new(Stm32Uart::new(uart));
    info!("UART initialized");

    let watchdog = Stm32Watchdog::start(IndependentWatchdog::new(p.IWDG, WATCHDOG_TIMEOUT_US));
    info!("Watchdog running ({} us)", WATCHDOG_TIMEOUT_US);

    Board {
        adc,
        bus,
        sense,
        actuator,
        store,
        link,
        watchdog,
    }
}
