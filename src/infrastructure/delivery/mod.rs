mod ble_command_sender;
mod btleplug_link;
mod command_sender_factory;
mod tcp_command_sender;

pub use ble_command_sender::BleCommandSender;
pub use btleplug_link::BtleplugLink;
pub use command_sender_factory::{CommandSenderFactory, CommandSenderFactoryError};
pub use tcp_command_sender::{
    READ_BUFFER_SIZE, StreamConnector, TcpCommandSender, TcpConnector, decode_message,
    send_floor_over_tcp,
};
