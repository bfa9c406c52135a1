//! Source column names of the hospital exports.
//!
//! Names are given in their normalized form: full-width parentheses are
//! folded to ASCII by the ingestion layer before lookup.

/// Columns of the disease detail export (病种详情).
pub mod disease {
    pub const NAME: &str = "名称";
    pub const DEPARTMENT: &str = "科室";
    pub const TREATMENT_GROUP: &str = "诊疗组";
    pub const DRG: &str = "DRG";
    pub const CASE_COUNT: &str = "总例数";
    pub const AVG_CONSUMABLE_COST: &str = "合计均耗材(元)";
    pub const CONSUMABLE_REFERENCE_TOTAL: &str = "合计耗材横向参考(元)";
    pub const CONSUMABLE_REFERENCE_PER_CASE: &str = "例均耗材横向参考(元)";
    pub const CONSUMABLE_COST_EXCESS: &str = "耗材超标值(元)";
    pub const TOTAL_COST: &str = "总费用(万元)";
    pub const DRG_COST: &str = "DRG费用(万元)";
    pub const INSURANCE_PAID_COST: &str = "医保实际费用(万元)";
    pub const AVG_LENGTH_OF_STAY: &str = "平均住院日(天)";
}

/// Columns of the case detail export (病例详情).
pub mod case {
    pub const PATIENT_NAME: &str = "姓名";
    pub const RECORD_NUMBER: &str = "病案号";
    pub const DRG_CODE: &str = "DRG编码";
    pub const DRG_NAME: &str = "DRG名称";
    pub const CLASSIFICATION: &str = "分类";
    pub const DISCHARGE_DEPARTMENT: &str = "出院科别";
    pub const LENGTH_OF_STAY: &str = "实际住院天数";
    pub const PREDICTED_PROFIT_LOSS: &str = "预测盈亏";
    pub const PRIMARY_DIAGNOSIS: &str = "主要诊断名称";
    pub const DISCHARGE_DATE: &str = "出院时间";
}

/// Columns of the consumable usage exports (耗材详情).
pub mod consumable {
    pub const PATIENT_NAME: &str = "姓名";
    pub const INPATIENT_ID: &str = "住院号";
    pub const OUTPATIENT_ID: &str = "门诊号";
    pub const ITEM_CODE: &str = "项目代码";
    pub const ITEM_NAME: &str = "项目名称";
    pub const QUANTITY: &str = "数量";
    pub const AMOUNT: &str = "AMT_HC";
    pub const DOCTOR: &str = "医生姓名";
    pub const EXPENSE_DATE: &str = "费用日期";
}
