//! Text generation gateway adapters.

mod mock_gateway;
mod openai_gateway;
mod unconfigured_gateway;

pub use mock_gateway::MockGateway;
pub use openai_gateway::{OpenAiGateway, OpenAiGatewayConfig};
pub use unconfigured_gateway::UnconfiguredGateway;
