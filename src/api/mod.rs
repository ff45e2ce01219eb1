// ==========================================
// 水泥熟料系数模拟系统 - API 层
// ==========================================
// 职责: 面向展示层的业务接口
// ==========================================

pub mod dto;
pub mod error;
pub mod simulation_api;
pub mod validator;

pub use dto::{
    BaselineResponse, Co2Input, Co2Response, FactorSource, OptionsResponse, OverrideDefault,
    SelectionRequest, SimulationResponse,
};
pub use error::{ApiError, ApiResult};
pub use simulation_api::SimulationApi;
pub use validator::{InputValidator, ValidationMode};
