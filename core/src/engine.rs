mod route_system;
mod slot_system;
mod snapshot;
