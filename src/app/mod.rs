// ==========================================
// 水泥熟料系数模拟系统 - 应用层
// ==========================================
// 职责: 应用状态组装 + 终端输出
// ==========================================

pub mod render;
pub mod state;

pub use state::AppState;
