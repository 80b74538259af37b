// Built-in sample texts, one per topic.
//
// Used when the caller gives no text of their own. Each preset is addressable
// by an ASCII slug (for the command line) or by its Arabic name.

use crate::error::{ExtractError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub slug: &'static str,
    pub name: &'static str,
    pub text: &'static str,
}

pub const DEFAULT_TOPIC: &str = "education";

pub static PRESETS: [Preset; 14] = [
    Preset {
        slug: "education",
        name: "التعليم",
        text: "التعليم هو أساس تقدم الأمم وازدهارها. يعتبر التعليم حقًا من حقوق الإنسان الأساسية، فهو يعزز من مهارات الأفراد ويزيد من فرصهم في الحياة. كما يسهم التعليم في بناء مجتمعات متقدمة تتمتع بالاستقرار الاقتصادي والاجتماعي. من خلال التعليم، يمكن للأفراد اكتساب المعرفة اللازمة للمشاركة الفعالة في مختلف المجالات. لذلك، يجب على الحكومات أن تركز على تطوير التعليم وتوفير الفرص التعليمية لجميع المواطنين. التعليم لا يقتصر على المدارس والجامعات، بل يمتد إلى الحياة اليومية والتعلم المستمر.",
    },
    Preset {
        slug: "economy",
        name: "الاقتصاد",
        text: "الاقتصاد هو العلم الذي يدرس كيفية استخدام الموارد المحدودة لتلبية احتياجات الأفراد والمجتمعات. يتعامل مع الإنتاج، والتوزيع، والاستهلاك، والتبادل للسلع والخدمات. يتأثر الاقتصاد بالعديد من العوامل مثل السياسات الحكومية، والطلب والعرض، والتطورات التكنولوجية. تعد التحديات الاقتصادية مثل التضخم، والبطالة، وعدم المساواة من القضايا الهامة التي يجب معالجتها. النمو الاقتصادي يساهم في تحسين مستويات المعيشة ويوفر فرص عمل جديدة. في عصر العولمة، أصبحت الاقتصادات العالمية مترابطة بشكل أكبر.",
    },
    Preset {
        slug: "technology",
        name: "التكنولوجيا",
        text: "التكنولوجيا تؤثر بشكل كبير على حياتنا اليومية، حيث أصبحت جزءاً أساسياً من العمليات في جميع المجالات. من الأجهزة الذكية إلى الإنترنت، أصبحت التكنولوجيا توفر حلولًا مبتكرة للعديد من التحديات. في مجال التعليم، تمكّن التكنولوجيا من الوصول إلى المعلومات بسرعة وسهولة. في الطب، ساعدت الابتكارات التكنولوجية في تحسين تشخيص الأمراض وعلاجها. علاوة على ذلك، غيرت التكنولوجيا بشكل جذري طريقة العمل والتواصل بين الأفراد. المستقبل يحمل المزيد من الابتكارات التي ستؤثر على حياتنا بطرق غير مسبوقة.",
    },
    Preset {
        slug: "environment",
        name: "البيئة",
        text: "البيئة هي نظام متكامل يعتمد على توازن عناصره للحفاظ على الحياة. تعد قضايا التلوث والتغير المناخي تحديات عالمية تتطلب تعاونًا دوليًا لمواجهتها. التلوث الناتج عن النشاطات البشرية يؤثر سلبًا على الهواء والماء والتربة، مما يؤدي إلى تدهور النظام البيئي. من المهم الحفاظ على التنوع البيولوجي وحماية الأنواع المهددة بالانقراض. يعد التحول إلى الطاقة المتجددة خطوة أساسية نحو الحد من الانبعاثات الكربونية. الحفاظ على البيئة يتطلب تغييرات في السلوكيات الفردية والجماعية من أجل حماية كوكبنا للأجيال القادمة.",
    },
    Preset {
        slug: "health",
        name: "الصحة",
        text: "الصحة هي أحد أعظم النعم التي يتمتع بها الإنسان. يتطلب الحفاظ على الصحة اتباع نمط حياة متوازن يشمل التغذية السليمة، ممارسة الرياضة بانتظام، والابتعاد عن العادات الضارة مثل التدخين. كما أن العناية بالصحة النفسية تعد أمرًا أساسيًا، إذ تؤثر بشكل مباشر على جودة حياة الفرد. يجب أن توفر المجتمعات أنظمة صحية قوية تضمن الرعاية الصحية للجميع. الابتكار في المجال الطبي يسهم في تطوير العلاجات والتشخيصات، ما يجعل علاج الأمراض أكثر فاعلية. الوقاية خير من العلاج، ولذلك يجب على الجميع اتخاذ التدابير اللازمة للحفاظ على صحتهم.",
    },
    Preset {
        slug: "culture",
        name: "الثقافة",
        text: "الثقافة هي مجموع المعارف والعادات والمعتقدات التي يتبناها مجتمع معين. تعكس الثقافة هوية الشعب وتشكل طريقة تفكيرهم وتفاعلاتهم مع العالم. تعد اللغة، الأدب، الفنون، والعادات الاجتماعية جزءًا أساسيًا من الثقافة. المحافظة على التراث الثقافي ضروري للحفاظ على الهوية الوطنية وتعزيز التفاهم بين الشعوب. الثقافة أيضًا تلعب دورًا في تحفيز الابتكار والتطوير في مجالات متعددة. من خلال تعزيز الثقافة، يمكن للفرد أن يطور تفكيره ويساهم في إغناء المجتمع.",
    },
    Preset {
        slug: "sport",
        name: "الرياضة",
        text: "الرياضة تعتبر جزءًا أساسيًا من حياة الإنسان، حيث تساهم في تعزيز اللياقة البدنية وتحسين الصحة العامة. الرياضة تخلق بيئة تنافسية يمكن أن تنمي من قدرات الأفراد وتعلمهم العمل الجماعي والصبر. كما أنها تلعب دورًا في تقوية العلاقات بين الدول من خلال المنافسات الرياضية الدولية. الرياضة ليست فقط للأشخاص المحترفين، بل يجب أن تكون جزءًا من روتين الحياة اليومية لكل فرد. ممارسة الرياضة تساعد في الوقاية من الأمراض المزمنة وتحسن من الصحة النفسية أيضًا.",
    },
    Preset {
        slug: "travel",
        name: "السفر",
        text: "السفر هو وسيلة لاكتشاف ثقافات وأماكن جديدة، ويمنح الفرصة للتعلم والتجارب الفريدة. من خلال السفر، يمكن للمرء أن يتعرف على تقاليد وأسلوب حياة شعوب أخرى، مما يساعد على توسيع الأفق الفكري. السفر يساعد أيضًا في تطوير مهارات التواصل والقدرة على التكيف مع بيئات جديدة. إن السفر لا يتعلق فقط بزيارة أماكن سياحية، بل هو أيضًا فرصة للاستراحة من الروتين اليومي واستكشاف عالم جديد. كما يمكن أن يعزز من الإبداع والابتكار من خلال التعرض لتجارب غير مألوفة.",
    },
    Preset {
        slug: "art",
        name: "الفن",
        text: "الفن هو تعبير عن الإبداع والتصورات الإنسانية باستخدام وسائل متعددة مثل الرسم، النحت، والموسيقى. الفن له تأثير كبير في نقل المشاعر والأفكار، ويمكن أن يكون وسيلة للتواصل بين الأفراد من ثقافات مختلفة. يعتبر الفن جزءًا من التراث الثقافي ويعكس قيم المجتمعات عبر العصور. إضافة إلى ذلك، يمكن للفن أن يكون وسيلة للتمرد والتغيير الاجتماعي من خلال توجيه انتقادات للأنظمة أو الأحداث. يعزز الفن من الإبداع ويشجع على التفكير النقدي.",
    },
    Preset {
        slug: "history",
        name: "التاريخ",
        text: "التاريخ هو سجل للأحداث والتطورات التي مرت بها البشرية، ويعكس الأحداث التي شكلت الحاضر والمستقبل. دراسة التاريخ تمنح الأفراد فهماً عميقاً للمجتمعات المختلفة وكيفية تطورها. من خلال دراسة التاريخ، يمكن للمرء أن يفهم الأخطاء الماضية ويتجنب تكرارها في المستقبل. التاريخ يساعد في بناء الهوية الوطنية ويزيد من التفاهم بين الشعوب. كما أنه يلعب دورًا في تعزيز التسامح والسلام في العالم من خلال معرفة تجارب الآخرين.",
    },
    Preset {
        slug: "artificial-intelligence",
        name: "الذكاء الاصطناعي",
        text: "الذكاء الاصطناعي هو مجال من مجالات علوم الكمبيوتر الذي يسعى إلى إنشاء أنظمة قادرة على محاكاة الذكاء البشري. يشمل الذكاء الاصطناعي التعلم الآلي، معالجة اللغة الطبيعية، الرؤية الحاسوبية، والروبوتات. أصبح الذكاء الاصطناعي جزءًا من حياتنا اليومية من خلال التطبيقات مثل المساعدات الصوتية، السيارات ذاتية القيادة، والتوصيات المخصصة. يسهم الذكاء الاصطناعي في تحسين العديد من الصناعات مثل الرعاية الصحية، التمويل، والتعليم. مع تطور الذكاء الاصطناعي، تزداد الأسئلة حول تأثيراته على سوق العمل والخصوصية.",
    },
    Preset {
        slug: "space",
        name: "الفضاء",
        text: "الفضاء هو الكون الذي يحتوي على النجوم والكواكب والمجرات والعديد من الأجرام السماوية. منذ العصور القديمة، كان الفضاء مصدرًا للدهشة والفضول. عبر التقدم العلمي والتكنولوجي، تمكن الإنسان من استكشاف الفضاء، بدءًا من إرسال الأقمار الصناعية إلى المريخ إلى إرسال مركبات فضائية إلى الكواكب البعيدة. إن دراسة الفضاء توفر لنا فهمًا أعمق لكوننا والمكان الذي نعيش فيه. الفضاء ليس مجرد مجال للاكتشافات العلمية، بل يحمل أيضًا إمكانيات للابتكار والتقدم في العديد من المجالات مثل الاتصالات والملاحة.",
    },
    Preset {
        slug: "social-justice",
        name: "العدالة الاجتماعية",
        text: "العدالة الاجتماعية هي مبدأ يهدف إلى تحقيق المساواة بين الأفراد في الحقوق والفرص. يتضمن ذلك محاربة التمييز في جميع أشكاله، سواء كان عنصريًا، دينيًا، أو اقتصاديًا. العدالة الاجتماعية تدعو إلى توزيع عادل للموارد والفرص، بما في ذلك التعليم، الرعاية الصحية، والعمل. تعتبر العدالة الاجتماعية حجر الزاوية لتحقيق التنمية المستدامة، حيث تساهم في تعزيز الاستقرار الاجتماعي والتقليل من التوترات بين الطبقات المختلفة. من خلال تعزيز العدالة الاجتماعية، يمكن بناء مجتمعات أكثر إنصافًا ورفاهية.",
    },
    Preset {
        slug: "agriculture",
        name: "الزراعة",
        text: "الزراعة هي أحد أقدم الأنشطة التي مارسها الإنسان، وهي المصدر الرئيسي للغذاء في العالم. تعتمد الزراعة على التربة والمياه والمناخ، وتتطلب معرفة دقيقة بمواسم الزراعة والحصاد. ساهمت التقنيات الحديثة مثل الري بالتنقيط والزراعة المحمية في زيادة الإنتاج وترشيد استهلاك المياه. تواجه الزراعة تحديات كبيرة مثل التصحر وشح المياه والتغير المناخي، مما يهدد الأمن الغذائي. يعد دعم المزارعين وتطوير البحوث الزراعية خطوة أساسية نحو تحقيق الاكتفاء الذاتي. كما تساهم الزراعة المستدامة في حماية البيئة والحفاظ على خصوبة التربة للأجيال القادمة.",
    },
];

/// Look up a preset by slug or Arabic name.
pub fn find(topic: &str) -> Option<&'static Preset> {
    let topic = topic.trim();
    PRESETS
        .iter()
        .find(|p| p.slug.eq_ignore_ascii_case(topic) || p.name == topic)
}

/// The caller's text when it has any non-whitespace content, otherwise the
/// text of the named preset.
pub fn resolve_input(text: Option<&str>, topic: &str) -> Result<String> {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        return Ok(text.to_string());
    }
    find(topic).map(|p| p.text.to_string()).ok_or_else(|| {
        let known: Vec<&str> = PRESETS.iter().map(|p| p.slug).collect();
        ExtractError::invalid(format!(
            "unknown topic '{topic}' (expected one of: {})",
            known.join(", ")
        ))
    })
}
