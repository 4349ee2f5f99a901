//! Keyword lists per category, Traditional Chinese and English.

pub(crate) const TECH_POSITIVE: &[&str] = &[
    "突破", "創新", "成長", "領先", "合作", "投資", "擴張", "升級",
    "量產", "訂單", "獲利", "營收", "新高", "看好", "利多", "加碼",
    "AI", "半導體", "晶片", "5G", "電動車", "綠能", "雲端",
    "breakthrough", "innovation", "launch", "released", "announcing",
    "open source", "faster", "better", "improved", "success", "growth",
    "funding", "acquired", "partnership", "record", "milestone",
    "revolutionary", "game-changer", "excited", "amazing", "awesome",
];

pub(crate) const TECH_NEGATIVE: &[&str] = &[
    "衰退", "下滑", "砍單", "裁員", "虧損", "衰減", "停工", "延遲",
    "缺貨", "斷鏈", "制裁", "禁令", "風險", "利空", "減產", "下修",
    "駭客", "資安", "漏洞", "召回",
    "layoff", "layoffs", "fired", "shutdown", "bankrupt", "failed",
    "breach", "hacked", "vulnerability", "exploit", "scam", "fraud",
    "lawsuit", "sued", "investigation", "controversy", "backlash",
    "deprecated", "broken", "bug", "outage", "down", "struggling",
    "disappointing", "concerned", "worried", "warning", "danger",
];

pub(crate) const FINANCE_POSITIVE: &[&str] = &[
    "上漲", "走高", "反彈", "突破", "買超", "加碼", "看多", "利多",
    "獲利", "成長", "穩健", "回升", "強勢", "多頭", "紅盤", "創高",
    "降息", "寬鬆", "資金", "外資", "法人",
];

pub(crate) const FINANCE_NEGATIVE: &[&str] = &[
    "下跌", "重挫", "崩盤", "賣超", "減碼", "看空", "利空", "虧損",
    "衰退", "跌停", "暴跌", "空頭", "綠盤", "套牢", "斷頭", "爆倉",
    "升息", "緊縮", "通膨", "違約", "倒閉",
];

pub(crate) const SOCIETY_POSITIVE: &[&str] = &[
    "希望", "改善", "進步", "成功", "突破", "合作", "支持", "幫助",
    "感謝", "開心", "期待", "祝福", "正向", "溫暖", "團結", "共好",
    "通過", "批准", "和解", "釋放", "勝出", "當選", "連任",
    "奪冠", "破紀錄", "創新高", "獲獎", "榮獲", "奪金", "摘金",
    "加碼", "補助", "減稅", "利多", "回升", "反彈",
    "捐款", "救援", "康復", "出院", "平安", "獲救", "脫困",
    "hope", "peace", "progress", "success", "unity", "support", "helped",
    "celebrate", "victory", "breakthrough", "happy", "joy", "love",
    "hero", "saved", "rescued", "recovered", "uplifting", "inspiring",
];

pub(crate) const SOCIETY_NEGATIVE: &[&str] = &[
    "擔憂", "失望", "憤怒", "抗議", "衝突", "危機", "問題", "災難",
    "悲傷", "恐慌", "焦慮", "不滿", "批評", "爭議", "對立", "分裂",
    // politics and courts
    "彈劾", "戒嚴", "內亂", "罷免", "貪污", "弊案", "起訴", "判刑",
    "羈押", "收押", "遭逮", "落網", "通緝",
    // weather and disasters
    "颱風", "地震", "暴風", "洪水", "土石流", "停電", "豪雨", "寒流",
    "暴雨", "淹水", "坍塌", "崩塌",
    // incidents
    "死刑", "殺人", "詐騙", "洗錢", "車禍", "墜機", "傷亡", "罹難",
    "失蹤", "溺斃", "身亡", "喪命", "重傷", "搶劫", "竊盜", "性侵",
    "裁員", "倒閉", "虧損", "下滑", "暴跌", "重挫",
    "戰爭", "轟炸", "空襲", "入侵", "砲擊", "飛彈", "襲擊",
    "war", "death", "killed", "died", "attack", "crisis", "disaster",
    "tragedy", "violence", "conflict", "protest", "riot", "shooting",
    "crash", "collapse", "fear", "threat", "danger", "warning", "emergency",
];
