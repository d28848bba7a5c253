mod roman;
