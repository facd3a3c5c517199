//! Built-in sura display names, used when no `sura-names.json` is present.

/// Names of suras 1 through 114, in order.
pub const SURA_NAMES: [&str; 114] = [
    "开端(法谛海)",
    "黄牛(巴格勒)",
    "仪姆兰的家属(阿黎仪姆兰)",
    "妇女(尼萨仪)",
    "筵席(马以代)",
    "牲畜(艾奈阿姆)",
    "高处(艾耳拉弗)",
    "战利品(安法勒)",
    "忏悔(讨白)",
    "优努斯",
    "呼德",
    "优素福",
    "雷霆(赖尔得)",
    "易卜拉欣",
    "石谷(希只尔)",
    "蜜蜂(奈哈勒)",
    "夜行(伊斯拉)",
    "山洞(凯海府)",
    "麦尔彦",
    "塔哈",
    "众先知(安比雅)",
    "朝觐(哈只)",
    "信士(慕米歌)",
    "光明(努尔)",
    "准则(弗尔干)",
    "众诗人(抒尔拉)",
    "蚂蚁(奈木勒)",
    "故事(改赛素)",
    "蜘蛛(安凯逋特)",
    "罗马人(鲁姆)",
    "鲁格曼",
    "叩头(赛直德)",
    "同盟军(艾哈萨布)",
    "赛伯邑",
    "创造者(法颓尔)",
    "雅辛",
    "列班者(萨法特)",
    "萨德",
    "队伍(助迈尔)",
    "赦宥者(阿斐尔)",
    "奉绥来特",
    "协商(舒拉)",
    "金饰(助赫鲁弗)",
    "烟雾(睹罕)",
    "屈膝(查西叶)",
    "沙丘(艾哈嘎弗)",
    "穆罕默德",
    "胜利(费特哈)",
    "寝室(侯主拉特)",
    "戛弗",
    "播种者 (达理雅特)",
    "山岳(突尔)",
    "星宿(奈智姆 )",
    "月亮(改买尔)",
    "至仁主(安赖哈曼)",
    "大事(瓦格尔)",
    "铁(哈迪德)",
    "辩诉者(姆查衣赖)",
    "放逐(哈什尔)",
    "受考验的妇人(慕姆太哈奈)",
    "列阵(蒜弗)",
    "聚礼(主麻)",
    "伪信者(莫拿非恭)",
    "相欺(台昂卜尼)",
    "离婚(特拉格)",
    "禁戒(台哈列姆)",
    "国权(姆勒克)",
    "笔(改赖姆)",
    "真灾(哈盖)",
    "天梯(买阿列支)",
    "努哈",
    "精灵(精尼)",
    "披衣的人(孟赞密鲁)",
    "盖被的人(孟荡西尔)",
    "复活(格雅迈)",
    "人(印萨尼)",
    "天使(姆尔赛拉特)",
    "消息(奈白易)",
    "急掣的(那寂阿特)",
    "皱眉(阿百塞)",
    "黯黜 (太克威尔)",
    "破裂(引斐塔尔)",
    "称量不公(太颓斐弗)",
    "绽裂(引史卡格)",
    "十二宫(补鲁智)",
    "启明星(塔里格)",
    "至尊(艾尔拉)",
    "大灾(阿史叶)",
    "黎明(史智尔)",
    "地方(白赖德)",
    "太阳(晒姆斯)",
    "黑夜(赖以里)",
    "上午 (堵哈)",
    "开拓(晒尔哈)",
    "无花果(梯尼)",
    "血块(阿赖格)",
    "高贵(盖德尔)",
    "明证(半以奈)",
    "地震(齐勒萨里)",
    "奔驰的马队(阿底雅特)",
    "大难(葛里尔)",
    "竞赛富庶(太卡素尔)",
    "时光(阿斯尔)",
    "诽谤者(胡买宰)",
    "象(斐里)",
    "古来氏",
    "什物(马欧尼)",
    "多福(考赛尔)",
    "不通道的人们(卡斐伦)",
    "援助(奈斯尔)",
    "火焰(赖海卜)",
    "忠诚(以赫拉斯)",
    "曙光(法赖格)",
    "世人(拿斯)",
];
