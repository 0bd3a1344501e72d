mod forward;
mod fuel_alerts;
mod notifications;
mod status;
mod structures;
