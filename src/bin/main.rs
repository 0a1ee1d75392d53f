#![cfg_attr(target_arch = "riscv32", no_std)]
#![cfg_attr(target_arch = "riscv32", no_main)]

#[cfg(target_arch = "riscv32")]
use {
    embassy_executor::Spawner,
    esp_backtrace as _,
    esp_println::println,
    i2cscan_lib::{
        board::{drive_fixed_outputs, i2c_bus},
        config::{LOG_LEVEL, SEPARATOR},
        poll_loop::PollLoop,
    },
    log::info,
};

#[cfg(all(target_arch = "riscv32", feature = "ble"))]
use {
    esp_hal::{
        peripherals::{BT, RADIO_CLK, RNG, SYSTIMER, TIMG0},
        rng::Rng,
        timer::{systimer::SystemTimer, timg::TimerGroup},
    },
    esp_wifi::{init, EspWifiController},
    i2cscan_lib::{
        ble::{gatt_server, StartupSignal},
        board::BringUpError,
        publish::ResultChannel,
    },
    static_cell::StaticCell,
};

#[cfg(all(target_arch = "riscv32", feature = "ble"))]
macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[cfg(target_arch = "riscv32")]
#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    println!("Init!");
    esp_println::logger::init_logger(LOG_LEVEL);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    let _outputs = drive_fixed_outputs(peripherals.GPIO7, peripherals.GPIO9, peripherals.GPIO10);

    let i2c = match i2c_bus(peripherals.I2C0, peripherals.GPIO23, peripherals.GPIO15) {
        Ok(i2c) => i2c,
        Err(e) => panic!("Startup aborted: {}", e),
    };

    #[cfg(feature = "ble")]
    let publisher = match start_radio(
        spawner,
        peripherals.TIMG0,
        peripherals.RNG,
        peripherals.RADIO_CLK,
        peripherals.SYSTIMER,
        peripherals.BT,
    )
    .await
    {
        Ok(results) => results,
        Err(e) => panic!("Startup aborted: {}", e),
    };

    #[cfg(not(feature = "ble"))]
    let publisher = {
        use esp_hal::timer::systimer::SystemTimer;
        let systimer = SystemTimer::new(peripherals.SYSTIMER);
        esp_hal_embassy::init(systimer.alarm0);
        let _ = spawner;

        i2cscan_lib::publish::ConsoleOnly
    };

    info!("Starting I2C bus scan...");
    info!("{}", SEPARATOR);

    PollLoop::new(i2c, esp_println::Printer, publisher)
        .run(&mut embassy_time::Delay)
        .await;
}

/// Brings up the radio and waits until the GATT server is advertising.
#[cfg(all(target_arch = "riscv32", feature = "ble"))]
async fn start_radio(
    spawner: Spawner,
    timg0: TIMG0,
    rng: RNG,
    radio_clk: RADIO_CLK,
    systimer: SYSTIMER,
    bluetooth: BT,
) -> Result<&'static ResultChannel, BringUpError> {
    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg0 = TimerGroup::new(timg0);

    let esp_wifi_ctrl = &*mk_static!(
        EspWifiController<'static>,
        init(timg0.timer0, Rng::new(rng), radio_clk)
        .map_err(BringUpError::Radio)?
    );

    let systimer = SystemTimer::new(systimer);
    esp_hal_embassy::init(systimer.alarm0);

    static RESULTS: StaticCell<ResultChannel> = StaticCell::new();
    let results = &*RESULTS.init(ResultChannel::new());

    static STARTUP: StaticCell<StartupSignal> = StaticCell::new();
    let startup = &*STARTUP.init(StartupSignal::new());

    spawner
        .spawn(gatt_server(esp_wifi_ctrl, bluetooth, results, startup))
        .ok();
    println!("Bluetooth spawned");

    startup.wait().await?;

    Ok(results)
}

#[cfg(not(target_arch = "riscv32"))]
fn main() {
    println!("c6-i2cscan only runs on the ESP32-C6 (riscv32imac-unknown-none-elf)");
}
