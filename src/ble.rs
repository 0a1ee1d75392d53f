use bleps::{
    ad_structure::{
        create_advertising_data, AdStructure, AdvertisementDataError, BR_EDR_NOT_SUPPORTED,
        LE_GENERAL_DISCOVERABLE,
    },
    async_attribute_server::AttributeServer,
    asynch::Ble,
    att::Uuid,
    attribute_server::NotificationData,
    gatt,
};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, signal::Signal};
use esp_hal::{peripherals::BT, time};
use esp_wifi::{ble::controller::BleConnector, EspWifiController};
use log::{error, info, warn};
use thiserror::Error;

use crate::{
    config::{DEVICE_NAME, SERVICE_UUID},
    link::LinkEvent,
    publish::ResultChannel,
};

#[derive(Error, Debug)]
pub enum BleError {
    #[error("BLE controller command failed: {0:?}")]
    Controller(bleps::Error),
    #[error("advertising data rejected: {0:?}")]
    AdvertisingData(AdvertisementDataError),
}

/// Reports whether the first advertising start worked.
pub type StartupSignal = Signal<NoopRawMutex, Result<(), BleError>>;

async fn start_advertising(ble: &mut Ble<BleConnector<'_>>) -> Result<(), BleError> {
    ble.init().await.map_err(BleError::Controller)?;
    ble.cmd_set_le_advertising_parameters()
        .await
        .map_err(BleError::Controller)?;

    let data = create_advertising_data(&[
        AdStructure::Flags(LE_GENERAL_DISCOVERABLE | BR_EDR_NOT_SUPPORTED),
        AdStructure::ServiceUuids128(&[Uuid::Uuid128(SERVICE_UUID.to_le_bytes())]),
        AdStructure::CompleteLocalName(DEVICE_NAME),
    ])
    .map_err(BleError::AdvertisingData)?;

    ble.cmd_set_le_advertising_data(data)
        .await
        .map_err(BleError::Controller)?;
    ble.cmd_set_le_advertise_enable(true)
        .await
        .map_err(BleError::Controller)?;

    info!("Advertising as '{}'", DEVICE_NAME);
    Ok(())
}

/// Serves one connection. Returns once the central disconnects.
async fn serve(ble: &mut Ble<BleConnector<'_>>, results: &'static ResultChannel) {
    let link = results.link();

    let mut read_record = |offset: usize, data: &mut [u8]| {
        link.record(LinkEvent::CentralConnected);
        results.read_at(offset, data)
    };

    // uuids mirror config::SERVICE_UUID and config::SCAN_RESULTS_UUID
    gatt!([service {
        uuid: "6e5a1f40-8c2b-4b7e-a1d3-2f9c0e4b7a10",
        characteristics: [characteristic {
            name: "scan_results",
            uuid: "6e5a1f41-8c2b-4b7e-a1d3-2f9c0e4b7a10",
            notify: true,
            read: read_record,
        },],
    },]);

    let mut rng = bleps::no_rng::NoRng;
    let mut srv = AttributeServer::new(ble, &mut gatt_attributes, &mut rng);

    // whatever was published while advertising is already in the snapshot
    results.discard_pending();

    let mut notifier = move || async move {
        let record = results.next_update().await;
        NotificationData::new(scan_results_handle, &record)
    };

    if let Err(e) = srv.run(&mut notifier).await {
        warn!("GATT server stopped: {:?}", e);
    }
}

#[embassy_executor::task]
pub async fn gatt_server(
    esp_wifi_ctrl: &'static EspWifiController<'static>,
    mut bluetooth: BT,
    results: &'static ResultChannel,
    startup: &'static StartupSignal,
) {
    let connector = BleConnector::new(esp_wifi_ctrl, &mut bluetooth);

    let now = || time::Instant::now().duration_since_epoch().as_millis();
    let mut ble = Ble::new(connector, now);
    let link = results.link();

    match start_advertising(&mut ble).await {
        Ok(()) => {
            link.record(LinkEvent::AdvertisingStarted);
            startup.signal(Ok(()));
        }
        Err(e) => {
            link.record(LinkEvent::StackFailed);
            startup.signal(Err(e));
            return;
        }
    }

    loop {
        serve(&mut ble, results).await;
        link.record(LinkEvent::CentralDisconnected);

        if let Err(e) = start_advertising(&mut ble).await {
            error!("Re-advertising failed: {}", e);
            link.record(LinkEvent::StackFailed);
            return;
        }
        link.record(LinkEvent::AdvertisingStarted);
    }
}
