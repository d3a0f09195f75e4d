//! CLI enum types for the process command.

use clap::ValueEnum;
use prism_core::ChannelOrder;

/// Histogram channel order.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ChannelOrderArg {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red
    Bgr,
}

impl From<ChannelOrderArg> for ChannelOrder {
    fn from(arg: ChannelOrderArg) -> Self {
        match arg {
            ChannelOrderArg::Rgb => ChannelOrder::Rgb,
            ChannelOrderArg::Bgr => ChannelOrder::Bgr,
        }
    }
}
