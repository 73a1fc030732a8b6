// ==========================================
// 租赁报表邮件采集服务 - 物业报表单元记录
// ==========================================
// 用途: 租金明细报表 (Rent Roll Itemized) 的一行
// 对齐: 上报接口 /property-reports 的 records 元素
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// UnitRecord - 单元记录
// ==========================================
// 红线: "Units" 小计行不产出记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    // ===== 主键 =====
    pub property: String, // 所属物业
    pub unit: String,     // 单元号

    // ===== 基础信息 =====
    pub bd_ba: Option<String>,  // 户型 (卧室/卫生间)
    pub status: Option<String>, // 出租状态
    pub sqft: Option<i64>,      // 面积（仅数值单元格）

    // ===== 金额 =====
    pub total: Option<f64>,
    pub past_due: Option<f64>,
    pub other_charges: Option<f64>,
    pub tenant_reimbursement_utilities: Option<f64>,
    pub tenant_rental_income: Option<f64>,

    // ===== 保障房补贴收入（按住房管理局）=====
    pub cha_affordable_housing_income: Option<f64>,
    pub iha_affordable_housing_income: Option<f64>,
    pub kckha_affordable_housing_income: Option<f64>,
    pub hakc_affordable_housing_income: Option<f64>,
    pub hud_affordable_housing_income: Option<f64>,

    // ===== 杂费 =====
    pub pet_rent: Option<f64>,
    pub storage_fee: Option<f64>,
    pub parking_fee: Option<f64>,
    pub insurance_services: Option<f64>,

    // ===== 租期 =====
    pub lease_from: Option<String>, // YYYY-MM-DD
    pub lease_to: Option<String>,   // YYYY-MM-DD
}
