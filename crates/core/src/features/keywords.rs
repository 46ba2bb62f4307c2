//! Word lists offered by completion.

pub const VERILOG_KEYWORDS: &[&str] = &[
    "always", "and", "assign", "automatic", "begin", "buf", "bufif0", "bufif1",
    "case", "casex", "casez", "cell", "cmos", "config", "deassign", "default",
    "defparam", "design", "disable", "edge", "else", "end", "endcase",
    "endconfig", "endfunction", "endgenerate", "endmodule", "endprimitive",
    "endspecify", "endtable", "endtask", "event", "for", "force", "forever",
    "fork", "function", "generate", "genvar", "highz0", "highz1", "if",
    "ifnone", "incdir", "include", "initial", "inout", "input", "instance",
    "integer", "join", "large", "liblist", "library", "localparam", "macromodule",
    "medium", "module", "nand", "negedge", "nmos", "nor", "noshowcancelled",
    "not", "notif0", "notif1", "or", "output", "parameter", "pmos", "posedge",
    "primitive", "pull0", "pull1", "pulldown", "pullup", "pulsestyle_onevent",
    "pulsestyle_ondetect", "rcmos", "real", "realtime", "reg", "release",
    "repeat", "rnmos", "rpmos", "rtran", "rtranif0", "rtranif1", "scalared",
    "showcancelled", "signed", "small", "specify", "specparam", "strong0",
    "strong1", "supply0", "supply1", "table", "task", "time", "tran",
    "tranif0", "tranif1", "tri", "tri0", "tri1", "triand", "trior", "trireg",
    "unsigned", "use", "vectored", "wait", "wand", "weak0", "weak1", "while",
    "wire", "wor", "xnor", "xor",
];

/// Added on top of [`VERILOG_KEYWORDS`].
pub const SYSTEMVERILOG_KEYWORDS: &[&str] = &[
    "alias", "always_comb", "always_ff", "always_latch", "assert", "assume",
    "before", "bind", "bins", "binsof", "bit", "break", "byte", "chandle",
    "class", "clocking", "const", "constraint", "context", "continue",
    "cover", "covergroup", "coverpoint", "cross", "dist", "do", "endclass",
    "endclocking", "endgroup", "endinterface", "endpackage", "endprogram",
    "endproperty", "endsequence", "enum", "expect", "export", "extends",
    "extern", "final", "first_match", "foreach", "forkjoin", "iff", "ignore_bins",
    "illegal_bins", "import", "inside", "int", "interface", "intersect",
    "join_any", "join_none", "local", "logic", "longint", "matches", "modport",
    "new", "null", "package", "packed", "priority", "program", "property",
    "protected", "pure", "rand", "randc", "randcase", "randsequence", "ref",
    "return", "sequence", "shortint", "shortreal", "solve", "static", "string",
    "struct", "super", "tagged", "this", "throughout", "timeprecision",
    "timeunit", "type", "typedef", "union", "unique", "unique0", "unsigned",
    "var", "virtual", "void", "wait_order", "wildcard", "with", "within",
];

/// Without the leading backtick.
pub const DIRECTIVES: &[&str] = &[
    "celldefine", "endcelldefine", "default_nettype", "define", "else", "elsif",
    "endif", "ifdef", "ifndef", "include", "line", "nounconnected_drive",
    "pragma", "resetall", "timescale", "unconnected_drive", "undef",
];

/// Without the leading `$`.
pub const VERILOG_SYSTEM_TASKS: &[&str] = &[
    "display", "displayb", "displayh", "displayo", "write", "writeb", "writeh",
    "writeo", "strobe", "strobeb", "strobeh", "strobeo", "monitor", "monitorb",
    "monitorh", "monitoro", "monitoron", "monitoroff", "time", "stime",
    "realtime", "finish", "stop", "readmemh", "readmemb", "value$plusargs",
    "random", "dumpfile", "dumpvars", "dumpon", "dumpoff", "dumpall",
    "dumpflush", "dumplimit", "fopen", "fclose", "fdisplay",
    "fdisplayb", "fdisplayh", "fdisplayo", "fwrite", "fwriteb", "fwriteh",
    "fwriteo", "fstrobe", "fstrobeb", "fstrobeh", "fstrobeo", "fmonitor",
    "fmonitorb", "fmonitorh", "fmonitoro", "sformat", "swrite", "countdrivers",
    "getpattern", "incsave", "restart", "save", "scale", "showscopes",
    "showvars", "showvariable", "input", "key", "log", "nolog", "scope",
    "showports", "showclass", "coverage_control", "coverage_merge",
    "coverage_save",
];

/// Added on top of [`VERILOG_SYSTEM_TASKS`].
pub const SYSTEMVERILOG_SYSTEM_TASKS: &[&str] = &[
    "fatal", "error", "warning", "info", "asserton", "assertoff",
    "assertkill", "onehot", "onehot0", "isunknown", "countones", "bits",
    "low", "high", "left", "right", "size", "increment", "dimensions",
    "unpacked_dimensions", "typeof", "unit", "root", "cast", "urandom",
    "urandom_range", "srandom", "get_randstate", "set_randstate", "dist_uniform",
    "dist_normal", "dist_exponential", "dist_poisson", "dist_chi_square",
    "dist_t", "dist_erlang",
];

pub const VHDL_KEYWORDS: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array",
    "assert", "attribute", "begin", "block", "body", "buffer", "bus", "case",
    "component", "configuration", "constant", "disconnect", "downto", "else",
    "elsif", "end", "entity", "exit", "file", "for", "function", "generate",
    "generic", "group", "guarded", "if", "impure", "in", "inertial", "inout",
    "is", "label", "library", "linkage", "literal", "loop", "map", "mod",
    "nand", "new", "next", "nor", "not", "null", "of", "on", "open", "or",
    "others", "out", "package", "port", "postponed", "procedure", "process",
    "pure", "range", "record", "register", "reject", "rem", "report",
    "return", "rol", "ror", "select", "severity", "signal", "shared", "sla",
    "sll", "sra", "srl", "subtype", "then", "to", "transport", "type",
    "unaffected", "units", "until", "use", "variable", "wait", "when",
    "while", "with", "xnor", "xor",
];

/// Words that never resolve to a declaration.
pub const NON_NAVIGABLE: &[&str] = &[
    "module", "endmodule", "begin", "end", "if", "else", "always", "initial",
    "assign", "entity", "architecture", "process",
];
