pub mod booking_messages;
pub mod bookings;
pub mod categories;
pub mod counters;
pub mod partners;
pub mod reviews;
pub mod services;
pub mod sub_services;
pub mod users;
pub mod vehicle_types;
pub mod wallet_transactions;
pub mod wallets;
